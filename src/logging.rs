//! File-backed `tracing` setup. The terminal belongs to the UI, so log lines
//! go to `owly.log` in the data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub const LOG_FILE_NAME: &str = "owly.log";
/// Environment variable that overrides `log_level` from the settings file.
pub const LOG_ENV_VAR: &str = "OWLY_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &Config, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).context("failed to create log directory")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
        .context("failed to open log file")?;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("failed to install log subscriber")
}

//! User settings stored as TOML next to the log file in `~/.owly/`. Every key
//! is optional; a missing file simply means "use the defaults", so a fresh
//! install works without any setup.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::catalog::{Endpoints, DEFAULT_BASE_URL, DEFAULT_COVERS_URL};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".owly";
/// Settings file name stored inside the application data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub covers_url: String,
    /// Works requested for the trending shelf.
    pub trending_limit: u32,
    /// How long an error banner stays up before it expires.
    pub banner_seconds: u64,
    /// `tracing` filter directive used when `OWLY_LOG` is unset.
    pub log_level: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            covers_url: DEFAULT_COVERS_URL.to_string(),
            trending_limit: 100,
            banner_seconds: 5,
            log_level: "info".to_string(),
            user_agent: format!("owly/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Read settings from `path`, falling back to defaults when the file does
    /// not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            base_url: self.base_url.clone(),
            covers_url: self.covers_url.clone(),
        }
    }

    pub fn banner_ttl(&self) -> Duration {
        Duration::from_secs(self.banner_seconds)
    }
}

/// `~/.owly`, created on demand.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    let dir = base_dirs.home_dir().join(DATA_DIR_NAME);
    fs::create_dir_all(&dir).context("failed to create data directory")?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.banner_ttl(), Duration::from_secs(5));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "trending_limit = 24\nlog_level = \"debug\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.trending_limit, 24);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.endpoints(), Endpoints::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "trending_limit = \"many\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("invalid settings"));
    }
}

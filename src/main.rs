//! Binary entry point: read settings, start logging, move the catalog client
//! onto its worker thread, and drive the Ratatui event loop until the user
//! exits.
use owly::catalog::{RandomPicker, UreqTransport};
use owly::config::{data_dir, CONFIG_FILE_NAME};
use owly::logging::init_logging;
use owly::{run_app, spawn_worker, App, CatalogClient, Config};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let dir = data_dir()?;
    let config = Config::load_from(&dir.join(CONFIG_FILE_NAME))?;
    init_logging(&config, &dir)?;
    info!(base_url = %config.base_url, "starting owly");

    let client = CatalogClient::new(
        config.endpoints(),
        Box::new(UreqTransport::new(&config.user_agent)),
        Box::new(RandomPicker::from_entropy()),
    );
    let worker = spawn_worker(client)?;

    let mut app = App::new(worker.jobs(), &config);
    let result = run_app(&mut app, worker.outcomes());
    info!("shutting down");
    result
}

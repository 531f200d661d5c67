//! Terminal client for the Open Library catalog.
//!
//! `catalog` wraps the three read endpoints, `worker` runs them off the UI
//! thread, and `ui` holds the controller plus the ratatui rendering. `config`
//! and `logging` are the small pieces of glue `main.rs` needs at startup.
pub mod catalog;
pub mod config;
pub mod logging;
pub mod models;
pub mod ui;
pub mod worker;

/// The client and its error type, used by the binary and by integration tests.
pub use catalog::{CatalogClient, CatalogError};

pub use config::Config;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};

pub use worker::{spawn_worker, FetchJob, FetchOutcome};

//! Ratatui front-end for the catalog. `App` is the controller: it owns the
//! result list, the page cursor, the detail modal and the error banners, and
//! never touches the network directly. Requests go out as worker jobs and the
//! answers are folded back in by `run_app` between frames.
//!
//! The screen is split into fixed regions (search bar, banners, results grid,
//! pagination row, footer). A terminal too small to fit them is reported as
//! `UiError::MissingElement` at startup instead of drawing a broken layout.

mod app;
mod forms;
mod helpers;
mod layout;
mod screens;
mod terminal;

use thiserror::Error;

pub use app::App;
pub use screens::{
    Banner, BookCard, DetailModal, DetailView, Pagination, ViewMode, BOOKS_PER_PAGE,
};
pub use terminal::run_app;

#[derive(Debug, Error)]
pub enum UiError {
    /// A required screen region does not fit in the terminal.
    #[error("terminal too small to place the {0}")]
    MissingElement(&'static str),
}

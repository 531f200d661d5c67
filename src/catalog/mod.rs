//! Read-only client for the Open Library catalog, split across logical
//! submodules.

mod client;
mod error;
mod transport;
mod trending;

pub use client::{
    cover_image_url, normalize_category, normalize_work_key, CatalogClient, CoverSize, Endpoints,
    DEFAULT_BASE_URL, DEFAULT_COVERS_URL, SEARCH_LIMIT,
};
pub use error::{CatalogError, CatalogResult};
pub use transport::{HttpResponse, Transport, UreqTransport};
pub use trending::{CategoryPicker, FixedPicker, RandomPicker, POPULAR_CATEGORIES};

#[cfg(test)]
pub(crate) use transport::fake;

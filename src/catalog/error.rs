use thiserror::Error;

/// Everything that can go wrong while talking to the catalog. The display
/// strings end up verbatim in the UI banners, hence the Italian wording.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A required search key was blank.
    #[error("{0}")]
    InvalidInput(String),
    /// The catalog answered with a non-2xx status.
    #[error("errore HTTP {status}")]
    Http { status: u16 },
    /// The body was not the JSON we expected.
    #[error("risposta non valida: {0}")]
    Parse(String),
    /// The request never completed.
    #[error("richiesta non completata: {0}")]
    Network(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

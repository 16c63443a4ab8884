use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Feed unavailable after {attempts} attempt(s): {source}")]
    FetchExhausted {
        attempts: u32,
        source: Box<CatalogError>,
    },
}

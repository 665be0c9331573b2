use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Registry unavailable: status {status}")]
    Unavailable { status: u16 },

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Invalid registry URL: {0}")]
    InvalidUrl(String),
}

impl RegistryError {
    /// Whether the registry could not be reached or refused to answer,
    /// as opposed to answering with an undecodable body.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, RegistryError::InvalidResponse(_))
    }
}

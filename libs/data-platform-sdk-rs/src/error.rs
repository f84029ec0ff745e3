use data_platform_types::ErrorCode;
use thiserror::Error;

/// Catalog client errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },

    /// Transport or body decoding failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Api { status: 404, .. })
    }
}

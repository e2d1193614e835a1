//! Transport-specific error types and conversions.

use agrodash_core::error::AgroError;

/// HTTP-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<HttpError> for AgroError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Client(e) => AgroError::Transport {
                status: e.status().map(|s| s.as_u16()),
                message: Some(e.to_string()),
            },
            HttpError::Decode(msg) => AgroError::Serialization(msg),
            HttpError::Io(e) => AgroError::Storage(e.to_string()),
            other => AgroError::Internal(other.to_string()),
        }
    }
}

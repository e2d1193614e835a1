//! Session error types.

use agrodash_core::error::AgroError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no refresh token available")]
    NoRefreshToken,

    #[error("credential storage error: {0}")]
    Storage(String),

    #[error("redirect loop while navigating to {0}")]
    RedirectLoop(String),
}

impl From<SessionError> for AgroError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => AgroError::InvalidCredentials,
            SessionError::NoRefreshToken => AgroError::NoRefreshToken,
            SessionError::Storage(msg) => AgroError::Storage(msg),
            SessionError::RedirectLoop(_) => AgroError::Internal(err.to_string()),
        }
    }
}

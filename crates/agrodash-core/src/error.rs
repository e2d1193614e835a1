//! Error types for the AgroDash client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgroError {
    #[error(
        "Request failed ({}): {}",
        status.map_or_else(|| "no response".to_string(), |s| format!("status {s}")),
        message.as_deref().unwrap_or("no details")
    )]
    Transport {
        /// HTTP status, `None` when the request never produced a response.
        status: Option<u16>,
        message: Option<String>,
    },

    #[error("Session is no longer valid")]
    AuthInvalid,

    #[error("Access forbidden: {}", message.as_deref().unwrap_or("insufficient permissions"))]
    Forbidden { message: Option<String> },

    #[error("Entity not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    #[error("Validation rejected: {message}")]
    ValidationRejected { message: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No refresh token available")]
    NoRefreshToken,

    #[error("{message}")]
    Export { status: Option<u16>, message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AgroError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AgroError::Transport { status, .. } | AgroError::Export { status, .. } => *status,
            AgroError::AuthInvalid => Some(401),
            AgroError::Forbidden { .. } => Some(403),
            AgroError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Message suitable for a transient user notification.
    pub fn user_message(&self) -> String {
        match self {
            AgroError::Transport {
                message: Some(m), ..
            } => m.clone(),
            AgroError::Transport { .. } => "Unknown error".into(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for AgroError {
    fn from(err: serde_json::Error) -> Self {
        AgroError::Serialization(err.to_string())
    }
}

pub type AgroResult<T> = Result<T, AgroError>;

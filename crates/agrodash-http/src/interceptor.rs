//! Error normalization for failed responses.
//!
//! Every non-success response from any resource client passes through
//! [`ErrorInterceptor::intercept`]. A 401 tears the session down and
//! redirects to the login screen, whichever endpoint produced it. Other
//! statuses never mutate state; they are logged and mapped onto the
//! [`AgroError`] taxonomy. Nothing is retried.

use std::sync::Arc;

use agrodash_core::error::AgroError;
use agrodash_core::navigation::{LOGIN_PATH, Navigator};
use agrodash_core::session::SessionInvalidator;
use reqwest::Method;
use tracing::{error, info, warn};

/// A response the backend answered with a non-success status.
#[derive(Debug, Clone)]
pub struct FailedResponse {
    pub method: Method,
    pub path: String,
    /// Resource the request was issued for (e.g. `farm`).
    pub resource: &'static str,
    /// Entity id, for single-entity requests.
    pub id: Option<i64>,
    pub status: u16,
    pub body: Vec<u8>,
}

impl FailedResponse {
    /// Human-readable message from a structured error body, if any.
    pub fn backend_message(&self) -> Option<String> {
        backend_message(&self.body)
    }
}

/// Extract `message` (then `error`) from a JSON error body.
pub fn backend_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Clone)]
pub struct ErrorInterceptor {
    invalidator: Arc<dyn SessionInvalidator>,
    navigator: Arc<dyn Navigator>,
}

impl ErrorInterceptor {
    pub fn new(invalidator: Arc<dyn SessionInvalidator>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            invalidator,
            navigator,
        }
    }

    pub fn intercept(&self, failure: &FailedResponse) -> AgroError {
        let message = failure.backend_message();

        match failure.status {
            401 => {
                info!(
                    method = %failure.method,
                    path = %failure.path,
                    "Authentication rejected, clearing session"
                );
                self.invalidator.invalidate();
                self.navigator.navigate(LOGIN_PATH);
                AgroError::AuthInvalid
            }
            403 => {
                warn!(path = %failure.path, message = ?message, "Access forbidden");
                AgroError::Forbidden { message }
            }
            404 => {
                warn!(path = %failure.path, "Resource not found");
                AgroError::NotFound {
                    resource: failure.resource.to_string(),
                    id: failure
                        .id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| failure.path.clone()),
                }
            }
            400 | 409 | 422 if message.is_some() => AgroError::ValidationRejected {
                message: message.unwrap_or_default(),
            },
            status if status >= 500 => {
                error!(path = %failure.path, status, message = ?message, "Server error");
                AgroError::Transport {
                    status: Some(status),
                    message,
                }
            }
            status => AgroError::Transport {
                status: Some(status),
                message,
            },
        }
    }
}

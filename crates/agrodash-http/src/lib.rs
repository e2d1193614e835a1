//! AgroDash HTTP: `reqwest` implementations of the resource clients,
//! the shared error hook, and the spreadsheet export trigger.
//!
//! This crate provides:
//! - Connection management ([`ApiClient`], [`ApiConfig`])
//! - Error normalization ([`ErrorInterceptor`])
//! - One client per backend resource ([`resources`])
//! - Report downloads ([`ExportClient`])

mod connection;
mod error;
pub mod export;
pub mod interceptor;
pub mod resources;

pub use connection::{ApiClient, ApiConfig, ApiRequest, RequestFailure};
pub use error::HttpError;
pub use export::{ExportClient, ExportReport, ExportedFile};
pub use interceptor::{ErrorInterceptor, FailedResponse};
pub use resources::AgroApi;

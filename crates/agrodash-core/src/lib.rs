//! AgroDash Core: domain models, error taxonomy, and the traits that
//! separate the session store from the HTTP transport.

pub mod client;
pub mod error;
pub mod models;
pub mod navigation;
pub mod session;

pub use error::{AgroError, AgroResult};
pub use models::session::Identity;

//! AgroDash session layer: the signed-in identity, its durable storage,
//! and the guards that decide which dashboard routes it may enter.

pub mod config;
pub mod error;
pub mod guard;
pub mod routes;
pub mod service;
pub mod state;
pub mod storage;

pub use config::SessionConfig;
pub use error::SessionError;
pub use guard::{GateDecision, GuardedRouter, Navigation};
pub use routes::{Access, Route, RouteTable};
pub use service::SessionService;
pub use state::SessionState;
pub use storage::{FileCredentialStore, MemoryCredentialStore};

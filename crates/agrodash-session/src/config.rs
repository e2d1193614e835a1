//! Session configuration.

use std::path::PathBuf;

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// File holding the persisted identity (access token, refresh token,
    /// user snapshot). Default: `$HOME/.agrodash/session.json`.
    pub storage_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            storage_path: home.join(".agrodash").join("session.json"),
        }
    }
}

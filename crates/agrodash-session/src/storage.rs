//! Durable credential storage.
//!
//! The identity is persisted as one JSON document so the access token,
//! refresh token and user snapshot can never drift apart: a save replaces
//! the whole document atomically, a clear removes it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use agrodash_core::error::{AgroError, AgroResult};
use agrodash_core::models::session::Identity;
use agrodash_core::session::CredentialStore;
use tracing::warn;

/// File-backed store: `{accessToken, refreshToken, currentUser}`.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn partial_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn storage_err(context: &str, e: impl std::fmt::Display) -> AgroError {
    AgroError::Storage(format!("{context}: {e}"))
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> AgroResult<Option<Identity>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_err("read session file", e)),
        };

        match serde_json::from_slice(&raw) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, identity: &Identity) -> AgroResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| storage_err("create session dir", e))?;
        }

        let body = serde_json::to_vec_pretty(identity)?;
        let partial = self.partial_path();

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&partial)
            .map_err(|e| storage_err("open session file", e))?;
        file.write_all(&body)
            .and_then(|_| file.sync_all())
            .map_err(|e| storage_err("write session file", e))?;
        drop(file);

        fs::rename(&partial, &self.path).map_err(|e| {
            let _ = fs::remove_file(&partial);
            storage_err("replace session file", e)
        })
    }

    fn clear(&self) -> AgroResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err("remove session file", e)),
        }
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    identity: Mutex<Option<Identity>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: Identity) -> Self {
        Self {
            identity: Mutex::new(Some(identity)),
        }
    }

    fn lock(&self) -> AgroResult<std::sync::MutexGuard<'_, Option<Identity>>> {
        self.identity
            .lock()
            .map_err(|_| AgroError::Storage("credential store poisoned".into()))
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> AgroResult<Option<Identity>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, identity: &Identity) -> AgroResult<()> {
        *self.lock()? = Some(identity.clone());
        Ok(())
    }

    fn clear(&self) -> AgroResult<()> {
        *self.lock()? = None;
        Ok(())
    }
}

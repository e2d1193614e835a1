//! Seams between the session store and the transport layer.
//!
//! The HTTP crate needs to read the current access token and to tear the
//! session down on an authentication failure, without depending on the
//! session crate. These traits are that boundary.

use crate::error::AgroResult;
use crate::models::session::Identity;

/// Durable storage for the session identity.
///
/// Implementations must write and clear the access token, refresh token
/// and user snapshot as a single unit.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> AgroResult<Option<Identity>>;
    fn save(&self, identity: &Identity) -> AgroResult<()>;
    fn clear(&self) -> AgroResult<()>;

    /// Stored refresh token, read straight from durable storage.
    fn refresh_token(&self) -> AgroResult<Option<String>> {
        Ok(self.load()?.map(|identity| identity.refresh_token))
    }
}

/// Supplies the bearer token attached to outgoing requests.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// Forced session teardown, used when the backend rejects credentials.
pub trait SessionInvalidator: Send + Sync {
    fn invalidate(&self);
}

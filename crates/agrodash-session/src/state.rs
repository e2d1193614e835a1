//! Process-wide session identity.
//!
//! [`SessionState`] is the single source of truth for who is signed in.
//! It is hydrated once from durable storage and afterwards only changes
//! through [`SessionState::establish`] (login, register, refresh) and
//! [`SessionState::clear`] (logout, forced invalidation). Both persist
//! before they publish, and both hold the same write lock across the two
//! steps, so storage and the published identity never disagree.

use std::sync::{Arc, Mutex, MutexGuard};

use agrodash_core::error::AgroResult;
use agrodash_core::models::session::Identity;
use agrodash_core::session::{CredentialStore, SessionInvalidator, TokenSource};
use tokio::sync::watch;
use tracing::{info, warn};

pub struct SessionState {
    store: Arc<dyn CredentialStore>,
    identity: watch::Sender<Option<Identity>>,
    /// Serializes persist-then-publish transitions.
    writes: Mutex<()>,
}

impl SessionState {
    /// Build the state from whatever `store` currently holds.
    ///
    /// An unreadable store starts the session logged out.
    pub fn hydrate(store: Arc<dyn CredentialStore>) -> Arc<Self> {
        let initial = match store.load() {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "Failed to load stored session, starting logged out");
                None
            }
        };
        if let Some(identity) = &initial {
            info!(email = %identity.user.email, "Restored session");
        }

        let (identity, _) = watch::channel(initial);
        Arc::new(Self {
            store,
            identity,
            writes: Mutex::new(()),
        })
    }

    fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.borrow().is_some()
    }

    /// Observe identity changes. The receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }

    /// Refresh token as durable storage holds it right now.
    pub(crate) fn stored_refresh_token(&self) -> AgroResult<Option<String>> {
        self.store.refresh_token()
    }

    pub(crate) fn establish(&self, identity: Identity) -> AgroResult<Identity> {
        let _guard = self.write_lock();
        self.store.save(&identity)?;
        self.identity.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    /// Drop the identity from storage and memory.
    ///
    /// Never fails: a storage error is logged and the in-memory identity
    /// is cleared anyway.
    pub(crate) fn clear(&self) {
        let _guard = self.write_lock();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
        self.identity.send_replace(None);
    }
}

impl TokenSource for SessionState {
    fn access_token(&self) -> Option<String> {
        self.identity
            .borrow()
            .as_ref()
            .map(|identity| identity.access_token.clone())
    }
}

impl SessionInvalidator for SessionState {
    fn invalidate(&self) {
        if self.is_authenticated() {
            info!("Session invalidated");
        }
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCredentialStore;
    use agrodash_core::models::user::{Role, User};
    use chrono::NaiveDate;

    fn identity() -> Identity {
        Identity {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            user: User {
                id: 1,
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                role: Role::Admin,
                enabled: true,
                created_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                    .unwrap()
                    .and_hms_opt(8, 30, 0)
                    .unwrap(),
                updated_at: None,
            },
        }
    }

    #[test]
    fn hydrates_from_store() {
        let store = MemoryCredentialStore::with_identity(identity());
        let state = SessionState::hydrate(Arc::new(store));
        assert_eq!(state.current_identity(), Some(identity()));
        assert_eq!(state.access_token().as_deref(), Some("access"));
    }

    #[test]
    fn invalidate_clears_memory_and_storage() {
        let store = Arc::new(MemoryCredentialStore::with_identity(identity()));
        let state = SessionState::hydrate(store.clone());
        let mut rx = state.subscribe();

        state.invalidate();

        assert_eq!(state.current_identity(), None);
        assert_eq!(state.access_token(), None);
        assert_eq!(store.load().unwrap(), None);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), None);
    }

    #[test]
    fn establish_persists_then_publishes() {
        let store = Arc::new(MemoryCredentialStore::new());
        let state = SessionState::hydrate(store.clone());
        let rx = state.subscribe();
        assert_eq!(*rx.borrow(), None);

        state.establish(identity()).unwrap();

        assert_eq!(store.load().unwrap(), Some(identity()));
        assert_eq!(*rx.borrow(), Some(identity()));
    }

    /// Store whose saves take long enough for a concurrent clear to land
    /// in between.
    struct SlowStore {
        inner: MemoryCredentialStore,
    }

    impl CredentialStore for SlowStore {
        fn load(&self) -> AgroResult<Option<Identity>> {
            self.inner.load()
        }

        fn save(&self, identity: &Identity) -> AgroResult<()> {
            std::thread::sleep(std::time::Duration::from_millis(100));
            self.inner.save(identity)
        }

        fn clear(&self) -> AgroResult<()> {
            self.inner.clear()
        }
    }

    #[test]
    fn concurrent_invalidate_never_splits_memory_and_storage() {
        let store = Arc::new(SlowStore {
            inner: MemoryCredentialStore::new(),
        });
        let state = SessionState::hydrate(store.clone());

        let writer = {
            let state = state.clone();
            std::thread::spawn(move || state.establish(identity()).unwrap())
        };
        std::thread::sleep(std::time::Duration::from_millis(30));
        state.invalidate();
        writer.join().unwrap();

        // The clear waits for the save to finish before touching either side.
        assert_eq!(state.current_identity(), store.load().unwrap());
    }
}

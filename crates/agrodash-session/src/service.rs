//! Session service: login, registration, refresh and logout.

use std::sync::Arc;

use agrodash_core::client::AuthApi;
use agrodash_core::error::{AgroError, AgroResult};
use agrodash_core::models::session::Identity;
use agrodash_core::models::user::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use tracing::info;

use crate::error::SessionError;
use crate::state::SessionState;

/// Session service.
///
/// Generic over the [`AuthApi`] implementation so the session layer has no
/// dependency on the HTTP crate.
pub struct SessionService<A: AuthApi> {
    api: A,
    state: Arc<SessionState>,
}

impl<A: AuthApi> SessionService<A> {
    pub fn new(api: A, state: Arc<SessionState>) -> Self {
        Self { api, state }
    }

    pub fn state(&self) -> &Arc<SessionState> {
        &self.state
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.state.current_identity()
    }

    /// Authenticate with email and password.
    ///
    /// On success the new identity is persisted and published. A login the
    /// backend rejects with 401 still passes through the error hook, which
    /// ends any existing session before this returns
    /// [`AgroError::InvalidCredentials`].
    pub async fn login(&self, input: LoginRequest) -> AgroResult<Identity> {
        let response = self
            .api
            .login(input)
            .await
            .map_err(rejected_as_invalid_credentials)?;

        let identity = self.state.establish(response.into())?;
        info!(email = %identity.user.email, role = %identity.role(), "Logged in");
        Ok(identity)
    }

    /// Create an account. The backend signs the new user in directly.
    pub async fn register(&self, input: RegisterRequest) -> AgroResult<Identity> {
        let response = self.api.register(input).await?;

        let identity = self.state.establish(response.into())?;
        info!(email = %identity.user.email, "Registered");
        Ok(identity)
    }

    /// Exchange the stored refresh token for a new token pair.
    ///
    /// Fails with [`AgroError::NoRefreshToken`] before touching the network
    /// when storage holds no refresh token.
    pub async fn refresh(&self) -> AgroResult<Identity> {
        let Some(refresh_token) = self.state.stored_refresh_token()? else {
            return Err(SessionError::NoRefreshToken.into());
        };

        let response = self
            .api
            .refresh(RefreshTokenRequest { refresh_token })
            .await?;

        let identity = self.state.establish(response.into())?;
        info!(email = %identity.user.email, "Session refreshed");
        Ok(identity)
    }

    /// End the session locally. The server is not contacted.
    pub fn logout(&self) {
        if let Some(identity) = self.state.current_identity() {
            info!(email = %identity.user.email, "Logged out");
        }
        self.state.clear();
    }
}

/// Any 400/401/403 from `/auth/login`, however the error hook classified it.
fn rejected_as_invalid_credentials(err: AgroError) -> AgroError {
    match err {
        AgroError::AuthInvalid
        | AgroError::Forbidden { .. }
        | AgroError::ValidationRejected { .. }
        | AgroError::Transport {
            status: Some(400 | 401 | 403),
            ..
        } => SessionError::InvalidCredentials.into(),
        other => other,
    }
}

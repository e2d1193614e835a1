//! Session identity: the client-local cache of server-issued credentials.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AgroError, AgroResult};
use crate::models::user::{AuthResponse, Role, User};

/// An authenticated user plus its credential tokens.
///
/// The three fields are always persisted and cleared together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(rename = "currentUser")]
    pub user: User,
}

impl Identity {
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Decode the access token's claims without verifying the signature.
    ///
    /// The signing key lives on the server; the client only reads claims
    /// for display (expiry, subject).
    pub fn access_token_claims(&self) -> AgroResult<AccessTokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        jsonwebtoken::decode::<AccessTokenClaims>(
            &self.access_token,
            &DecodingKey::from_secret(&[]),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| AgroError::Serialization(format!("access token: {e}")))
    }

    /// Expiry of the access token, if it carries an `exp` claim.
    pub fn access_token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.access_token_claims()
            .ok()
            .and_then(|c| c.exp)
            .and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

impl From<AuthResponse> for Identity {
    fn from(resp: AuthResponse) -> Self {
        Self {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token,
            user: resp.user,
        }
    }
}

/// Subset of the backend's JWT claims the client cares about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AccessTokenClaims {
    /// Subject, i.e. the user's email.
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

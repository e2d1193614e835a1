//! `/auth` endpoints.

use agrodash_core::client::AuthApi;
use agrodash_core::error::AgroResult;
use agrodash_core::models::user::{
    AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
};

use crate::connection::ApiClient;

const RESOURCE: &str = "auth";

#[derive(Clone)]
pub struct HttpAuthApi {
    client: ApiClient,
}

impl HttpAuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, input: LoginRequest) -> AgroResult<AuthResponse> {
        self.client
            .post(RESOURCE, "/auth/login".into())
            .json(&input)
            .fetch_json()
            .await
    }

    async fn register(&self, input: RegisterRequest) -> AgroResult<AuthResponse> {
        self.client
            .post(RESOURCE, "/auth/register".into())
            .json(&input)
            .fetch_json()
            .await
    }

    async fn refresh(&self, input: RefreshTokenRequest) -> AgroResult<AuthResponse> {
        self.client
            .post(RESOURCE, "/auth/refresh".into())
            .json(&input)
            .fetch_json()
            .await
    }
}

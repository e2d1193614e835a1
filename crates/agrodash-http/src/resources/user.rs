//! `/users` administration client.

use agrodash_core::client::UserClient;
use agrodash_core::error::AgroResult;
use agrodash_core::models::user::User;

use crate::connection::ApiClient;

const RESOURCE: &str = "user";
const BASE: &str = "/users";

#[derive(Clone)]
pub struct HttpUserClient {
    client: ApiClient,
}

impl HttpUserClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl UserClient for HttpUserClient {
    async fn list(&self) -> AgroResult<Vec<User>> {
        self.client.get(RESOURCE, BASE.into()).fetch_json().await
    }

    async fn get_by_id(&self, id: i64) -> AgroResult<User> {
        self.client
            .get(RESOURCE, format!("{BASE}/{id}"))
            .entity(id)
            .fetch_json()
            .await
    }

    async fn toggle_enabled(&self, id: i64) -> AgroResult<User> {
        self.client
            .patch(RESOURCE, format!("{BASE}/{id}/toggle-enabled"))
            .entity(id)
            .fetch_json()
            .await
    }

    async fn delete(&self, id: i64) -> AgroResult<()> {
        self.client
            .delete(RESOURCE, format!("{BASE}/{id}"))
            .entity(id)
            .fetch_empty()
            .await
    }
}

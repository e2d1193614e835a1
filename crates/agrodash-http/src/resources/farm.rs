//! `/farms` resource client.

use agrodash_core::client::FarmClient;
use agrodash_core::error::AgroResult;
use agrodash_core::models::farm::{Farm, FarmRequest};

use crate::connection::ApiClient;

const RESOURCE: &str = "farm";
const BASE: &str = "/farms";

#[derive(Clone)]
pub struct HttpFarmClient {
    client: ApiClient,
}

impl HttpFarmClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl FarmClient for HttpFarmClient {
    async fn create(&self, input: FarmRequest) -> AgroResult<Farm> {
        self.client
            .post(RESOURCE, BASE.into())
            .json(&input)
            .fetch_json()
            .await
    }

    async fn list(&self) -> AgroResult<Vec<Farm>> {
        self.client.get(RESOURCE, BASE.into()).fetch_json().await
    }

    async fn get_by_id(&self, id: i64) -> AgroResult<Farm> {
        self.client
            .get(RESOURCE, format!("{BASE}/{id}"))
            .entity(id)
            .fetch_json()
            .await
    }

    async fn update(&self, id: i64, input: FarmRequest) -> AgroResult<Farm> {
        self.client
            .put(RESOURCE, format!("{BASE}/{id}"))
            .entity(id)
            .json(&input)
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

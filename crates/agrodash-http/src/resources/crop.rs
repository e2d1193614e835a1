//! `/crops` resource client.

use agrodash_core::client::CropClient;
use agrodash_core::error::AgroResult;
use agrodash_core::models::crop::{Crop, CropRequest};

use crate::connection::ApiClient;

const RESOURCE: &str = "crop";
const BASE: &str = "/crops";

#[derive(Clone)]
pub struct HttpCropClient {
    client: ApiClient,
}

impl HttpCropClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl CropClient for HttpCropClient {
    async fn create(&self, input: CropRequest) -> AgroResult<Crop> {
        self.client
            .post(RESOURCE, BASE.into())
            .json(&input)
            .fetch_json()
            .await
    }

    async fn list(&self) -> AgroResult<Vec<Crop>> {
        self.client.get(RESOURCE, BASE.into()).fetch_json().await
    }

    async fn get_by_id(&self, id: i64) -> AgroResult<Crop> {
        self.client
            .get(RESOURCE, format!("{BASE}/{id}"))
            .entity(id)
            .fetch_json()
            .await
    }

    async fn update(&self, id: i64, input: CropRequest) -> AgroResult<Crop> {
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

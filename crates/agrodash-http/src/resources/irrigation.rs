//! `/irrigations` resource client.

use agrodash_core::client::IrrigationClient;
use agrodash_core::error::AgroResult;
use agrodash_core::models::irrigation::{Irrigation, IrrigationRequest, IrrigationStatus};

use crate::connection::ApiClient;

const RESOURCE: &str = "irrigation";
const BASE: &str = "/irrigations";

#[derive(Clone)]
pub struct HttpIrrigationClient {
    client: ApiClient,
}

impl HttpIrrigationClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl IrrigationClient for HttpIrrigationClient {
    async fn create(&self, input: IrrigationRequest) -> AgroResult<Irrigation> {
        self.client
            .post(RESOURCE, BASE.into())
            .json(&input)
            .fetch_json()
            .await
    }

    async fn list(&self) -> AgroResult<Vec<Irrigation>> {
        self.client.get(RESOURCE, BASE.into()).fetch_json().await
    }

    async fn get_by_id(&self, id: i64) -> AgroResult<Irrigation> {
        self.client
            .get(RESOURCE, format!("{BASE}/{id}"))
            .entity(id)
            .fetch_json()
            .await
    }

    async fn update(&self, id: i64, input: IrrigationRequest) -> AgroResult<Irrigation> {
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

    async fn list_by_parcel(&self, parcel_id: i64) -> AgroResult<Vec<Irrigation>> {
        self.client
            .get(RESOURCE, format!("{BASE}/parcel/{parcel_id}"))
            .fetch_json()
            .await
    }

    async fn list_by_status(&self, status: IrrigationStatus) -> AgroResult<Vec<Irrigation>> {
        self.client
            .get(RESOURCE, format!("{BASE}/status/{status}"))
            .fetch_json()
            .await
    }

    async fn list_upcoming(&self) -> AgroResult<Vec<Irrigation>> {
        self.client
            .get(RESOURCE, format!("{BASE}/upcoming"))
            .fetch_json()
            .await
    }

    async fn update_status(&self, id: i64, status: IrrigationStatus) -> AgroResult<Irrigation> {
        self.client
            .patch(RESOURCE, format!("{BASE}/{id}/status"))
            .entity(id)
            .query(&[("status", status.as_str())])
            .fetch_json()
            .await
    }

    async fn execute(&self, id: i64) -> AgroResult<String> {
        self.client
            .post(RESOURCE, format!("{BASE}/{id}/execute"))
            .entity(id)
            .fetch_text()
            .await
    }

    async fn stop(&self, id: i64) -> AgroResult<String> {
        self.client
            .post(RESOURCE, format!("{BASE}/{id}/stop"))
            .entity(id)
            .fetch_text()
            .await
    }
}

//! `/fertilizations` resource client.

use agrodash_core::client::FertilizationClient;
use agrodash_core::error::AgroResult;
use agrodash_core::models::fertilization::{
    Fertilization, FertilizationRequest, FertilizationStatus, ScheduleFertilization,
};

use crate::connection::{ApiClient, ApiRequest};

const RESOURCE: &str = "fertilization";
const BASE: &str = "/fertilizations";

/// Query-string format the backend expects for `scheduledDatetime`.
const DATETIME_PARAM_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Clone)]
pub struct HttpFertilizationClient {
    client: ApiClient,
}

impl HttpFertilizationClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Completion and cancellation carry optional free-text notes as the
    /// raw request body.
    fn with_notes(request: ApiRequest<'_>, notes: Option<String>) -> ApiRequest<'_> {
        match notes {
            Some(notes) => request.text_body(notes),
            None => request,
        }
    }
}

impl FertilizationClient for HttpFertilizationClient {
    async fn create(&self, input: FertilizationRequest) -> AgroResult<Fertilization> {
        self.client
            .post(RESOURCE, BASE.into())
            .json(&input)
            .fetch_json()
            .await
    }

    async fn schedule(&self, input: ScheduleFertilization) -> AgroResult<Fertilization> {
        let params = [
            ("parcelId", input.parcel_id.to_string()),
            (
                "scheduledDatetime",
                input
                    .scheduled_datetime
                    .format(DATETIME_PARAM_FORMAT)
                    .to_string(),
            ),
            ("fertilizerType", input.fertilizer_type),
        ];
        self.client
            .post(RESOURCE, format!("{BASE}/schedule"))
            .query(&params)
            .fetch_json()
            .await
    }

    async fn list(&self) -> AgroResult<Vec<Fertilization>> {
        self.client.get(RESOURCE, BASE.into()).fetch_json().await
    }

    async fn get_by_id(&self, id: i64) -> AgroResult<Fertilization> {
        self.client
            .get(RESOURCE, format!("{BASE}/{id}"))
            .entity(id)
            .fetch_json()
            .await
    }

    async fn update(&self, id: i64, input: FertilizationRequest) -> AgroResult<Fertilization> {
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

    async fn list_by_parcel(&self, parcel_id: i64) -> AgroResult<Vec<Fertilization>> {
        self.client
            .get(RESOURCE, format!("{BASE}/parcel/{parcel_id}"))
            .fetch_json()
            .await
    }

    async fn list_by_status(&self, status: FertilizationStatus) -> AgroResult<Vec<Fertilization>> {
        self.client
            .get(RESOURCE, format!("{BASE}/status/{status}"))
            .fetch_json()
            .await
    }

    async fn list_by_status_for_user(
        &self,
        status: FertilizationStatus,
    ) -> AgroResult<Vec<Fertilization>> {
        self.client
            .get(RESOURCE, format!("{BASE}/user/status/{status}"))
            .fetch_json()
            .await
    }

    async fn complete(&self, id: i64, notes: Option<String>) -> AgroResult<Fertilization> {
        let request = self
            .client
            .patch(RESOURCE, format!("{BASE}/{id}/complete"))
            .entity(id);
        Self::with_notes(request, notes).fetch_json().await
    }

    async fn cancel(&self, id: i64, notes: Option<String>) -> AgroResult<Fertilization> {
        let request = self
            .client
            .patch(RESOURCE, format!("{BASE}/{id}/cancel"))
            .entity(id);
        Self::with_notes(request, notes).fetch_json().await
    }

    async fn update_status(
        &self,
        id: i64,
        status: FertilizationStatus,
    ) -> AgroResult<Fertilization> {
        self.client
            .patch(RESOURCE, format!("{BASE}/{id}/status"))
            .entity(id)
            .query(&[("status", status.as_str())])
            .fetch_json()
            .await
    }
}

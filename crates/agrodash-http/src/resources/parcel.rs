//! `/parcels` resource client.

use agrodash_core::client::ParcelClient;
use agrodash_core::error::AgroResult;
use agrodash_core::models::parcel::{Parcel, ParcelRequest, ParcelWeather};

use crate::connection::ApiClient;

const RESOURCE: &str = "parcel";
const BASE: &str = "/parcels";

#[derive(Clone)]
pub struct HttpParcelClient {
    client: ApiClient,
}

impl HttpParcelClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl ParcelClient for HttpParcelClient {
    async fn create(&self, input: ParcelRequest) -> AgroResult<Parcel> {
        self.client
            .post(RESOURCE, BASE.into())
            .json(&input)
            .fetch_json()
            .await
    }

    async fn list(&self) -> AgroResult<Vec<Parcel>> {
        self.client.get(RESOURCE, BASE.into()).fetch_json().await
    }

    async fn get_by_id(&self, id: i64) -> AgroResult<Parcel> {
        self.client
            .get(RESOURCE, format!("{BASE}/{id}"))
            .entity(id)
            .fetch_json()
            .await
    }

    async fn update(&self, id: i64, input: ParcelRequest) -> AgroResult<Parcel> {
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

    async fn list_by_farm(&self, farm_id: i64) -> AgroResult<Vec<Parcel>> {
        self.client
            .get(RESOURCE, format!("{BASE}/farm/{farm_id}"))
            .fetch_json()
            .await
    }

    async fn list_by_crop(&self, crop_id: i64) -> AgroResult<Vec<Parcel>> {
        self.client
            .get(RESOURCE, format!("{BASE}/crop/{crop_id}"))
            .fetch_json()
            .await
    }

    async fn weather(&self, id: i64) -> AgroResult<ParcelWeather> {
        self.client
            .get(RESOURCE, format!("{BASE}/{id}/weather"))
            .entity(id)
            .fetch_json()
            .await
    }
}

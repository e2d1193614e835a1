//! HTTP implementations of the resource-client traits.

mod auth;
mod crop;
mod farm;
mod fertilization;
mod irrigation;
mod parcel;
mod user;

pub use auth::HttpAuthApi;
pub use crop::HttpCropClient;
pub use farm::HttpFarmClient;
pub use fertilization::HttpFertilizationClient;
pub use irrigation::HttpIrrigationClient;
pub use parcel::HttpParcelClient;
pub use user::HttpUserClient;

use crate::connection::ApiClient;

/// Every resource client over one shared connection.
#[derive(Clone)]
pub struct AgroApi {
    pub auth: HttpAuthApi,
    pub farms: HttpFarmClient,
    pub parcels: HttpParcelClient,
    pub crops: HttpCropClient,
    pub irrigations: HttpIrrigationClient,
    pub fertilizations: HttpFertilizationClient,
    pub users: HttpUserClient,
}

impl AgroApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: HttpAuthApi::new(client.clone()),
            farms: HttpFarmClient::new(client.clone()),
            parcels: HttpParcelClient::new(client.clone()),
            crops: HttpCropClient::new(client.clone()),
            irrigations: HttpIrrigationClient::new(client.clone()),
            fertilizations: HttpFertilizationClient::new(client.clone()),
            users: HttpUserClient::new(client),
        }
    }
}

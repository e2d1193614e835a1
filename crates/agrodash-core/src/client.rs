//! Resource-client trait definitions.
//!
//! Each trait maps one backend resource onto typed async operations.
//! Implementations issue exactly one request per call: no retries, no
//! caching, no client-side validation. All state checks (e.g. executing a
//! completed irrigation) are enforced by the server.

use crate::error::AgroResult;
use crate::models::{
    crop::{Crop, CropRequest},
    farm::{Farm, FarmRequest},
    fertilization::{
        Fertilization, FertilizationRequest, FertilizationStatus, ScheduleFertilization,
    },
    irrigation::{Irrigation, IrrigationRequest, IrrigationStatus},
    parcel::{Parcel, ParcelRequest, ParcelWeather},
    user::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, User},
};

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

pub trait AuthApi: Send + Sync {
    fn login(
        &self,
        input: LoginRequest,
    ) -> impl Future<Output = AgroResult<AuthResponse>> + Send;
    fn register(
        &self,
        input: RegisterRequest,
    ) -> impl Future<Output = AgroResult<AuthResponse>> + Send;
    fn refresh(
        &self,
        input: RefreshTokenRequest,
    ) -> impl Future<Output = AgroResult<AuthResponse>> + Send;
}

// ---------------------------------------------------------------------------
// Farm structure
// ---------------------------------------------------------------------------

pub trait FarmClient: Send + Sync {
    fn create(&self, input: FarmRequest) -> impl Future<Output = AgroResult<Farm>> + Send;
    fn list(&self) -> impl Future<Output = AgroResult<Vec<Farm>>> + Send;
    fn get_by_id(&self, id: i64) -> impl Future<Output = AgroResult<Farm>> + Send;
    fn update(
        &self,
        id: i64,
        input: FarmRequest,
    ) -> impl Future<Output = AgroResult<Farm>> + Send;
    fn delete(&self, id: i64) -> impl Future<Output = AgroResult<()>> + Send;
}

pub trait ParcelClient: Send + Sync {
    fn create(&self, input: ParcelRequest) -> impl Future<Output = AgroResult<Parcel>> + Send;
    fn list(&self) -> impl Future<Output = AgroResult<Vec<Parcel>>> + Send;
    fn get_by_id(&self, id: i64) -> impl Future<Output = AgroResult<Parcel>> + Send;
    fn update(
        &self,
        id: i64,
        input: ParcelRequest,
    ) -> impl Future<Output = AgroResult<Parcel>> + Send;
    fn delete(&self, id: i64) -> impl Future<Output = AgroResult<()>> + Send;
    fn list_by_farm(&self, farm_id: i64) -> impl Future<Output = AgroResult<Vec<Parcel>>> + Send;
    fn list_by_crop(&self, crop_id: i64) -> impl Future<Output = AgroResult<Vec<Parcel>>> + Send;
    fn weather(&self, id: i64) -> impl Future<Output = AgroResult<ParcelWeather>> + Send;
}

pub trait CropClient: Send + Sync {
    fn create(&self, input: CropRequest) -> impl Future<Output = AgroResult<Crop>> + Send;
    fn list(&self) -> impl Future<Output = AgroResult<Vec<Crop>>> + Send;
    fn get_by_id(&self, id: i64) -> impl Future<Output = AgroResult<Crop>> + Send;
    fn update(
        &self,
        id: i64,
        input: CropRequest,
    ) -> impl Future<Output = AgroResult<Crop>> + Send;
    fn delete(&self, id: i64) -> impl Future<Output = AgroResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Field operations
// ---------------------------------------------------------------------------

pub trait IrrigationClient: Send + Sync {
    fn create(
        &self,
        input: IrrigationRequest,
    ) -> impl Future<Output = AgroResult<Irrigation>> + Send;
    fn list(&self) -> impl Future<Output = AgroResult<Vec<Irrigation>>> + Send;
    fn get_by_id(&self, id: i64) -> impl Future<Output = AgroResult<Irrigation>> + Send;
    fn update(
        &self,
        id: i64,
        input: IrrigationRequest,
    ) -> impl Future<Output = AgroResult<Irrigation>> + Send;
    fn delete(&self, id: i64) -> impl Future<Output = AgroResult<()>> + Send;
    fn list_by_parcel(
        &self,
        parcel_id: i64,
    ) -> impl Future<Output = AgroResult<Vec<Irrigation>>> + Send;
    fn list_by_status(
        &self,
        status: IrrigationStatus,
    ) -> impl Future<Output = AgroResult<Vec<Irrigation>>> + Send;
    fn list_upcoming(&self) -> impl Future<Output = AgroResult<Vec<Irrigation>>> + Send;
    fn update_status(
        &self,
        id: i64,
        status: IrrigationStatus,
    ) -> impl Future<Output = AgroResult<Irrigation>> + Send;
    /// Ask the backend to start the irrigation now. Returns the server's
    /// plain-text acknowledgement.
    fn execute(&self, id: i64) -> impl Future<Output = AgroResult<String>> + Send;
    fn stop(&self, id: i64) -> impl Future<Output = AgroResult<String>> + Send;
}

pub trait FertilizationClient: Send + Sync {
    fn create(
        &self,
        input: FertilizationRequest,
    ) -> impl Future<Output = AgroResult<Fertilization>> + Send;
    fn schedule(
        &self,
        input: ScheduleFertilization,
    ) -> impl Future<Output = AgroResult<Fertilization>> + Send;
    fn list(&self) -> impl Future<Output = AgroResult<Vec<Fertilization>>> + Send;
    fn get_by_id(&self, id: i64) -> impl Future<Output = AgroResult<Fertilization>> + Send;
    fn update(
        &self,
        id: i64,
        input: FertilizationRequest,
    ) -> impl Future<Output = AgroResult<Fertilization>> + Send;
    fn delete(&self, id: i64) -> impl Future<Output = AgroResult<()>> + Send;
    fn list_by_parcel(
        &self,
        parcel_id: i64,
    ) -> impl Future<Output = AgroResult<Vec<Fertilization>>> + Send;
    fn list_by_status(
        &self,
        status: FertilizationStatus,
    ) -> impl Future<Output = AgroResult<Vec<Fertilization>>> + Send;
    /// Like [`list_by_status`](Self::list_by_status), restricted to the
    /// authenticated user's farms.
    fn list_by_status_for_user(
        &self,
        status: FertilizationStatus,
    ) -> impl Future<Output = AgroResult<Vec<Fertilization>>> + Send;
    fn complete(
        &self,
        id: i64,
        notes: Option<String>,
    ) -> impl Future<Output = AgroResult<Fertilization>> + Send;
    fn cancel(
        &self,
        id: i64,
        notes: Option<String>,
    ) -> impl Future<Output = AgroResult<Fertilization>> + Send;
    fn update_status(
        &self,
        id: i64,
        status: FertilizationStatus,
    ) -> impl Future<Output = AgroResult<Fertilization>> + Send;
}

// ---------------------------------------------------------------------------
// User administration
// ---------------------------------------------------------------------------

/// Users are created through registration, so there is no `create`.
pub trait UserClient: Send + Sync {
    fn list(&self) -> impl Future<Output = AgroResult<Vec<User>>> + Send;
    fn get_by_id(&self, id: i64) -> impl Future<Output = AgroResult<User>> + Send;
    fn toggle_enabled(&self, id: i64) -> impl Future<Output = AgroResult<User>> + Send;
    fn delete(&self, id: i64) -> impl Future<Output = AgroResult<()>> + Send;
}

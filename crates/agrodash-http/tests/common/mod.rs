//! In-process fake of the farm-management backend.
//!
//! Serves a subset of the REST API from memory on an ephemeral port.
//! Resource routes require `Authorization: Bearer <VALID_TOKEN>`.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use agrodash_core::models::farm::{Farm, FarmRequest};
use agrodash_core::models::fertilization::{Fertilization, FertilizationStatus};
use agrodash_core::models::irrigation::{Irrigation, IrrigationStatus};
use agrodash_core::models::parcel::Parcel;
use agrodash_core::models::user::{AuthResponse, LoginRequest, RefreshTokenRequest, Role, User};
use agrodash_core::session::{SessionInvalidator, TokenSource};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, patch, post};
use axum::{Json, Router};
use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::json;

pub const VALID_TOKEN: &str = "valid-token";
pub const PASSWORD: &str = "correct-horse-battery";
pub const XLSX_BYTES: &[u8] = b"PK\x03\x04fake-spreadsheet";

#[derive(Default)]
pub struct BackendState {
    pub farms: BTreeMap<i64, Farm>,
    pub parcels: Vec<Parcel>,
    pub irrigations: BTreeMap<i64, Irrigation>,
    pub fertilizations: BTreeMap<i64, Fertilization>,
    pub next_id: i64,
    /// Authorization header of every resource request, in arrival order.
    pub seen_auth: Vec<Option<String>>,
    pub requests: usize,
    /// Canned bodies for the recording routes, keyed by method and path.
    pub canned: BTreeMap<(String, String), serde_json::Value>,
    pub recorded: Vec<Recorded>,
}

/// One request served by a recording route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: String,
}

impl BackendState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub fn requests(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    pub fn seen_auth(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().seen_auth.clone()
    }

    /// Serve `body` for `method path` on a recording route. A JSON string
    /// is sent as plain text.
    pub fn respond(&self, method: &str, path: &str, body: serde_json::Value) {
        self.state
            .lock()
            .unwrap()
            .canned
            .insert((method.into(), path.into()), body);
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().recorded.clone()
    }

    pub fn last_recorded(&self) -> Recorded {
        self.recorded().pop().expect("no recorded request")
    }

    pub fn insert_parcel(&self, farm_id: i64, name: &str) -> Parcel {
        let mut state = self.state.lock().unwrap();
        let parcel = Parcel {
            id: state.next_id(),
            name: name.into(),
            latitude: None,
            longitude: None,
            area: Some(1.5),
            last_irrigated_at: None,
            last_fertilized_at: None,
            farm_id,
            farm_name: None,
            crop_id: None,
            crop_name: None,
        };
        state.parcels.push(parcel.clone());
        parcel
    }

    pub fn insert_irrigation(&self, parcel_id: i64, status: IrrigationStatus) -> Irrigation {
        let mut state = self.state.lock().unwrap();
        let now = now();
        let irrigation = Irrigation {
            id: state.next_id(),
            parcel_id,
            parcel_name: None,
            scheduled_datetime: now,
            duration_minutes: Some(30),
            water_amount_liters: None,
            status,
            start_datetime: None,
            finished_datetime: None,
            retry_count: 0,
            last_retry_at: None,
            status_description: None,
            created_at: now,
            updated_at: now,
        };
        state.irrigations.insert(irrigation.id, irrigation.clone());
        irrigation
    }
}

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn test_user(role: Role) -> User {
    User {
        id: 1,
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        role,
        enabled: true,
        created_at: now(),
        updated_at: None,
    }
}

/// Token source + invalidator standing in for the session store.
#[derive(Default)]
pub struct TestSession {
    pub token: Mutex<Option<String>>,
    pub invalidations: Mutex<usize>,
}

impl TestSession {
    pub fn with_token(token: &str) -> Arc<Self> {
        Arc::new(Self {
            token: Mutex::new(Some(token.into())),
            invalidations: Mutex::new(0),
        })
    }
}

impl TokenSource for TestSession {
    fn access_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

impl SessionInvalidator for TestSession {
    fn invalidate(&self) {
        *self.token.lock().unwrap() = None;
        *self.invalidations.lock().unwrap() += 1;
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

pub async fn spawn() -> FakeBackend {
    let state: Shared = Arc::new(Mutex::new(BackendState::default()));

    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/farms", get(list_farms).post(create_farm))
        .route(
            "/farms/{id}",
            get(get_farm).put(update_farm).delete(delete_farm),
        )
        .route("/parcels/farm/{id}", get(parcels_by_farm))
        .route("/irrigations/upcoming", get(upcoming_irrigations))
        .route("/irrigations/{id}/status", patch(irrigation_status))
        .route("/irrigations/{id}/execute", post(execute_irrigation))
        .route("/fertilizations/schedule", post(schedule_fertilization))
        .route("/fertilizations/{id}/complete", patch(complete_fertilization))
        .route("/parcels/crop/{id}", any(recorded))
        .route("/parcels/{id}/weather", any(recorded))
        .route("/crops", any(recorded))
        .route("/crops/{id}", any(recorded))
        .route("/users", any(recorded))
        .route("/users/{id}", any(recorded))
        .route("/users/{id}/toggle-enabled", any(recorded))
        .route("/irrigations/parcel/{id}", any(recorded))
        .route("/irrigations/status/{status}", any(recorded))
        .route("/irrigations/{id}/stop", any(recorded))
        .route("/fertilizations", any(recorded))
        .route("/fertilizations/{id}", any(recorded))
        .route("/fertilizations/status/{status}", any(recorded))
        .route("/fertilizations/user/status/{status}", any(recorded))
        .route("/fertilizations/{id}/cancel", any(recorded))
        .route("/fertilizations/{id}/status", any(recorded))
        .route("/export/farms", get(export_with_name))
        .route("/export/crops", get(export_without_name))
        .route("/export/irrigations", get(export_empty))
        .route("/export/farm/{id}", get(export_failure))
        .route("/export/parcel/{id}", get(export_text_failure))
        .with_state(state.clone());

    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend {
        base_url: format!("http://{addr}/api"),
        state,
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<serde_json::Value>)>;

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(json!({ "message": message, "status": status.as_u16() })))
}

fn authorize(state: &Shared, headers: &HeaderMap) -> ApiResult<()> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let mut guard = state.lock().unwrap();
    guard.requests += 1;
    guard.seen_auth.push(auth.clone());

    let expected = format!("Bearer {VALID_TOKEN}");
    if auth.as_deref() == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Full authentication is required"))
    }
}

async fn login(
    State(state): State<Shared>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    state.lock().unwrap().requests += 1;
    if req.email.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Email is required"));
    }
    if req.password != PASSWORD {
        return Err(error(StatusCode::UNAUTHORIZED, "Bad credentials"));
    }
    let mut user = test_user(Role::Admin);
    user.email = req.email;
    Ok(Json(AuthResponse {
        access_token: VALID_TOKEN.into(),
        refresh_token: "refresh-1".into(),
        user,
    }))
}

async fn refresh(
    State(state): State<Shared>,
    Json(req): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    state.lock().unwrap().requests += 1;
    if req.refresh_token.is_empty() {
        return Err(error(StatusCode::UNAUTHORIZED, "Invalid refresh token"));
    }
    Ok(Json(AuthResponse {
        access_token: VALID_TOKEN.into(),
        refresh_token: format!("{}-rotated", req.refresh_token),
        user: test_user(Role::Admin),
    }))
}

async fn list_farms(
    State(state): State<Shared>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Farm>>> {
    authorize(&state, &headers)?;
    Ok(Json(state.lock().unwrap().farms.values().cloned().collect()))
}

async fn create_farm(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<FarmRequest>,
) -> ApiResult<(StatusCode, Json<Farm>)> {
    authorize(&state, &headers)?;
    if req.name.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Farm name is required"));
    }
    let mut guard = state.lock().unwrap();
    let farm = Farm {
        id: guard.next_id(),
        name: req.name,
        location: req.location,
        created_at: now(),
        parcel_count: None,
    };
    guard.farms.insert(farm.id, farm.clone());
    Ok((StatusCode::CREATED, Json(farm)))
}

async fn get_farm(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<Json<Farm>> {
    authorize(&state, &headers)?;
    state
        .lock()
        .unwrap()
        .farms
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Farm not found"))
}

async fn update_farm(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(req): Json<FarmRequest>,
) -> ApiResult<Json<Farm>> {
    authorize(&state, &headers)?;
    let mut guard = state.lock().unwrap();
    let farm = guard
        .farms
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Farm not found"))?;
    farm.name = req.name;
    farm.location = req.location;
    Ok(Json(farm.clone()))
}

async fn delete_farm(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    authorize(&state, &headers)?;
    match state.lock().unwrap().farms.remove(&id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(error(StatusCode::NOT_FOUND, "Farm not found")),
    }
}

async fn parcels_by_farm(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<Parcel>>> {
    authorize(&state, &headers)?;
    let guard = state.lock().unwrap();
    Ok(Json(
        guard
            .parcels
            .iter()
            .filter(|p| p.farm_id == id)
            .cloned()
            .collect(),
    ))
}

async fn upcoming_irrigations(
    State(state): State<Shared>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<Irrigation>>> {
    authorize(&state, &headers)?;
    let guard = state.lock().unwrap();
    Ok(Json(
        guard
            .irrigations
            .values()
            .filter(|i| i.status == IrrigationStatus::Scheduled)
            .cloned()
            .collect(),
    ))
}

#[derive(Deserialize)]
struct StatusQuery {
    status: IrrigationStatus,
}

async fn irrigation_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<Irrigation>> {
    authorize(&state, &headers)?;
    let mut guard = state.lock().unwrap();
    let irrigation = guard
        .irrigations
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Irrigation not found"))?;
    irrigation.status = query.status;
    Ok(Json(irrigation.clone()))
}

async fn execute_irrigation(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<String> {
    authorize(&state, &headers)?;
    let mut guard = state.lock().unwrap();
    let irrigation = guard
        .irrigations
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Irrigation not found"))?;
    if !irrigation.status.can_execute() {
        return Err(error(
            StatusCode::CONFLICT,
            "Irrigation cannot be executed in its current state",
        ));
    }
    irrigation.status = IrrigationStatus::InProgress;
    Ok(format!("Irrigation {id} started"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleQuery {
    parcel_id: i64,
    scheduled_datetime: NaiveDateTime,
    fertilizer_type: String,
}

async fn schedule_fertilization(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<ScheduleQuery>,
) -> ApiResult<Json<Fertilization>> {
    authorize(&state, &headers)?;
    let mut guard = state.lock().unwrap();
    let now = now();
    let fertilization = Fertilization {
        id: guard.next_id(),
        parcel_id: query.parcel_id,
        parcel_name: None,
        scheduled_datetime: query.scheduled_datetime,
        fertilizer_type: Some(query.fertilizer_type),
        status: FertilizationStatus::Scheduled,
        completed_datetime: None,
        notes: None,
        created_at: now,
        updated_at: now,
    };
    guard
        .fertilizations
        .insert(fertilization.id, fertilization.clone());
    Ok(Json(fertilization))
}

async fn complete_fertilization(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    body: String,
) -> ApiResult<Json<Fertilization>> {
    authorize(&state, &headers)?;
    let mut guard = state.lock().unwrap();
    let fertilization = guard
        .fertilizations
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Fertilization not found"))?;
    fertilization.status = FertilizationStatus::Completed;
    fertilization.completed_datetime = Some(now());
    fertilization.notes = (!body.is_empty()).then_some(body);
    Ok(Json(fertilization.clone()))
}

/// Records the request and answers with whatever `FakeBackend::respond`
/// loaded for it, or 204 when nothing was loaded.
async fn recorded(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Err(e) = authorize(&state, &headers) {
        return e.into_response();
    }
    let path = uri.path().trim_start_matches("/api").to_string();
    let mut guard = state.lock().unwrap();
    guard.recorded.push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        body,
    });
    match guard.canned.get(&(method.to_string(), path)) {
        Some(serde_json::Value::String(text)) => text.clone().into_response(),
        Some(value) => Json(value.clone()).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn export_with_name(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(e) = authorize(&state, &headers) {
        return e.into_response();
    }
    (
        [
            (header::CONTENT_TYPE, agrodash_http::export::XLSX_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, r#"attachment; filename="q3.xlsx""#),
        ],
        XLSX_BYTES,
    )
        .into_response()
}

async fn export_without_name(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(e) = authorize(&state, &headers) {
        return e.into_response();
    }
    (
        [(header::CONTENT_TYPE, agrodash_http::export::XLSX_CONTENT_TYPE)],
        XLSX_BYTES,
    )
        .into_response()
}

async fn export_empty(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(e) = authorize(&state, &headers) {
        return e.into_response();
    }
    StatusCode::OK.into_response()
}

async fn export_failure(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(e) = authorize(&state, &headers) {
        return e.into_response();
    }
    error(StatusCode::INTERNAL_SERVER_ERROR, "Farm has no parcels to export").into_response()
}

async fn export_text_failure(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(e) = authorize(&state, &headers) {
        return e.into_response();
    }
    (StatusCode::BAD_GATEWAY, "weather provider unavailable").into_response()
}

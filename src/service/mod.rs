//! HTTP front end for the registration page scraper
//!
//! `GET /api/vehicle-info?rc=<REGISTRATION_NUMBER>` answers with a
//! [`VehicleRecord`] or `{"error": "..."}`.

pub mod client;

pub use client::{DEFAULT_UPSTREAM, ServiceConfig, VahanxClient};

use crate::{error::ScrapeError, scrape::{VehicleRecord, parse_vehicle_page}};
use axum::{Json, Router,
           extract::{Query, State},
           http::StatusCode,
           response::{IntoResponse, Response},
           routing::get};
use serde_json::json;
use std::sync::Arc;

pub const VEHICLE_INFO_PATH: &str = "/api/vehicle-info";

#[derive(Clone)]
pub struct AppState {
    client: Arc<VahanxClient>,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Result<Self, ScrapeError> {
        Ok(Self { client: Arc::new(VahanxClient::new(config)?) })
    }
}

pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(json!({ "error": msg }))).into_response()
    }
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// First non-blank `rc` value; repeated parameters are not an error
fn first_rc(params: &[(String, String)]) -> Option<String> {
    params
        .iter()
        .find(|(key, _)| key == "rc")
        .map(|(_, value)| value.trim().to_string())
        .filter(|rc| !rc.is_empty())
}

pub fn router(state: AppState) -> Router {
    Router::new().route(VEHICLE_INFO_PATH, get(vehicle_info)).with_state(state)
}

async fn vehicle_info(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<VehicleRecord>, ApiError> {
    let rc = first_rc(&params).ok_or_else(|| ApiError::BadRequest("Missing rc parameter".to_string()))?;

    let html = state.client.fetch_page(&rc).await.map_err(|e| {
        log::error!("Fetching {} failed: {}", rc, e);
        ApiError::from(e)
    })?;

    let record = parse_vehicle_page(&html);
    log::info!("Served vehicle info for {}", rc);
    Ok(Json(record))
}

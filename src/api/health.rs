//! Health check endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, AppState};

use super::response::CommonResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

impl HealthResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<CommonResponse<HealthResponse>> {
    Json(CommonResponse::success("ok", HealthResponse::new("healthy")))
}

/// Readiness check endpoint (checks database connectivity)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 400, description = "Database unreachable")
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> AppResult<Json<CommonResponse<HealthResponse>>> {
    state.services.repository.ping().await?;
    Ok(Json(CommonResponse::success("ok", HealthResponse::new("ready"))))
}

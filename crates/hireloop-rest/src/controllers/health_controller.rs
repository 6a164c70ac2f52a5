//! Health check controller.

use crate::{
    responses::{ApiResponse, ErrorBody},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use futures::future::join_all;
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// State of one dependency.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub name: String,
    /// `up`, `degraded` or `down`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub components: Vec<ComponentHealth>,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Probes every registered dependency. Degraded components do not fail
/// readiness; any component that is down does.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "A dependency is down", body = ErrorBody)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let statuses = join_all(state.health_checks.iter().map(|check| check.check())).await;

    let components: Vec<ComponentHealth> = state
        .health_checks
        .iter()
        .zip(statuses)
        .map(|(check, status)| ComponentHealth {
            name: check.name().to_string(),
            status: status.label().to_string(),
            message: status.message().map(ToString::to_string),
        })
        .collect();

    let down: Vec<&str> = components
        .iter()
        .filter(|c| c.status == "down")
        .map(|c| c.name.as_str())
        .collect();

    if down.is_empty() {
        let body = ApiResponse::success(ReadinessResponse {
            status: "ready".to_string(),
            components,
        });
        return (StatusCode::OK, Json(body)).into_response();
    }

    let body = ErrorBody {
        success: false,
        error: "SERVICE_UNAVAILABLE".to_string(),
        message: format!("Unavailable dependencies: {}", down.join(", ")),
        details: None,
    };
    (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses((status = 200, description = "Service is alive"))
)]
pub async fn liveness_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("alive"))
}

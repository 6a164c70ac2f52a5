//! Main application router.

use crate::{
    controllers::{application_controller, health_controller, job_controller, user_controller},
    middleware::{auth_middleware, expose_error_details, logging_middleware},
    openapi::ApiDoc,
    responses::AppError,
    state::AppState,
};
use axum::{
    http::{HeaderName, HeaderValue, Uri},
    middleware,
    routing::get,
    Json, Router,
};
use hireloop_config::ServerConfig;
use hireloop_core::HireloopError;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Builds the full application router.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let api_router = Router::new()
        .nest("/users", user_controller::router())
        .nest("/jobs", job_controller::router())
        .nest("/applications", application_controller::router())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let detailed_errors = state.detailed_errors;
    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api", api_router)
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/", get(root))
        .fallback(not_found)
        .with_state(state);

    let router = if detailed_errors {
        router.layer(middleware::from_fn(expose_error_details))
    } else {
        router
    };

    let router = router
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(server_config))
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints under /api and OpenAPI at /api-docs/openapi.json");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn root() -> &'static str {
    "Hireloop API"
}

async fn not_found(uri: Uri) -> AppError {
    AppError(HireloopError::not_found("Route", uri.path()))
}

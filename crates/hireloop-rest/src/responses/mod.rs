//! API response types.
//!
//! Every route answers with the same envelope:
//!
//! ```json
//! {"success": true,  "message": "...", "data": {...}, "meta": {...}}
//! {"success": false, "error": "NOT_FOUND", "message": "...", "details": [...]}
//! ```
//!
//! `message` and `meta` are omitted when absent, as is `details`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hireloop_core::{FieldError, HireloopError};
use serde::Serialize;
use std::time::Duration;
use tracing::error;
use utoipa::ToSchema;

/// Message shown for 5xx errors unless detailed errors are enabled.
pub const GENERIC_ERROR_MESSAGE: &str = "An internal error occurred";

/// The response envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiResponse<T> {
    Success(SuccessBody<T>),
    Error(ErrorBody),
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessBody<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

/// Error half of the envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable code, e.g. `VALIDATION_ERROR`.
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Extra information on cached list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Whether the page came from the cache.
    pub cached: bool,
    /// Handler time, including the cache or store round trip.
    pub response_time_ms: u64,
    pub ttl_seconds: u64,
}

impl ResponseMeta {
    #[must_use]
    pub fn new(cached: bool, elapsed: Duration, ttl: Duration) -> Self {
        Self {
            cached,
            response_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            ttl_seconds: ttl.as_secs(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self::Success(SuccessBody {
            success: true,
            message: None,
            data,
            meta: None,
        })
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        if let Self::Success(body) = &mut self {
            body.message = Some(message.into());
        }
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: ResponseMeta) -> Self {
        if let Self::Success(body) = &mut self {
            body.meta = Some(meta);
        }
        self
    }
}

impl ApiResponse<()> {
    /// Builds the public error envelope. 5xx messages are replaced with
    /// [`GENERIC_ERROR_MESSAGE`].
    pub fn error(err: &HireloopError) -> Self {
        if err.is_server_error() {
            Self::Error(ErrorBody::new(err, GENERIC_ERROR_MESSAGE.to_string()))
        } else {
            Self::detailed_error(err)
        }
    }

    /// Builds the error envelope with the underlying message, whatever the
    /// status.
    pub fn detailed_error(err: &HireloopError) -> Self {
        let message = match err {
            HireloopError::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self::Error(ErrorBody::new(err, message))
    }
}

impl ErrorBody {
    fn new(err: &HireloopError, message: String) -> Self {
        Self {
            success: false,
            error: err.error_code().to_string(),
            message,
            details: err.details().filter(|d| !d.is_empty()).map(<[FieldError]>::to_vec),
        }
    }
}

/// Unredacted body of a 5xx response, attached to the response extensions
/// for [`crate::middleware::expose_error_details`].
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub ApiResponse<()>);

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub HireloopError);

impl From<HireloopError> for AppError {
    fn from(err: HireloopError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, Json(ApiResponse::error(&self.0))).into_response();

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
            response
                .extensions_mut()
                .insert(ErrorDetail(ApiResponse::detailed_error(&self.0)));
        }

        response
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Result type for handlers answering 201.
pub type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

/// 200 with data.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// 200 with data and a human-readable message.
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data).with_message(message)))
}

/// 201 with the created resource.
pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data).with_message(message))))
}

/// Payload of delete responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeletedResource {
    pub id: String,
}

/// Payload of cache invalidation responses.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheCleared {
    pub deleted_keys: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_omits_empty_fields() {
        let value = serde_json::to_value(ApiResponse::success(json!({"id": 1}))).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"id": 1}}));
    }

    #[test]
    fn test_success_envelope_with_message_and_meta() {
        let response = ApiResponse::success(json!([]))
            .with_message("done")
            .with_meta(ResponseMeta::new(true, Duration::from_millis(3), Duration::from_secs(60)));
        let value = serde_json::to_value(response).unwrap();

        assert_eq!(value["message"], "done");
        assert_eq!(value["meta"], json!({"cached": true, "responseTimeMs": 3, "ttlSeconds": 60}));
    }

    #[test]
    fn test_error_envelope_carries_details() {
        let err = HireloopError::validation_fields(
            "email: Invalid email format",
            vec![FieldError::new("email", "email", "Invalid email format")],
        );
        let value = serde_json::to_value(ApiResponse::error(&err)).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "VALIDATION_ERROR");
        assert_eq!(value["message"], "email: Invalid email format");
        assert_eq!(value["details"][0]["field"], "email");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = HireloopError::not_found("Job", "42");
        let value = serde_json::to_value(ApiResponse::error(&err)).unwrap();

        assert_eq!(value["error"], "NOT_FOUND");
        assert_eq!(value["message"], "Job not found: 42");
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_server_error_message_is_generic() {
        let err = HireloopError::Database("password authentication failed".into());

        let hidden = serde_json::to_value(ApiResponse::error(&err)).unwrap();
        assert_eq!(hidden["message"], GENERIC_ERROR_MESSAGE);
        assert_eq!(hidden["error"], "DATABASE_ERROR");

        let shown = serde_json::to_value(ApiResponse::detailed_error(&err)).unwrap();
        assert!(shown["message"].as_str().unwrap().contains("password authentication failed"));
        assert_eq!(shown["error"], "DATABASE_ERROR");
    }

    #[test]
    fn test_server_error_response_carries_detail_extension() {
        let response = AppError(HireloopError::Database("pool timed out".into())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let ErrorDetail(detail) = response.extensions().get::<ErrorDetail>().cloned().unwrap();
        let detail = serde_json::to_value(detail).unwrap();
        assert!(detail["message"].as_str().unwrap().contains("pool timed out"));
    }

    #[test]
    fn test_client_error_response_has_no_detail_extension() {
        let response = AppError(HireloopError::not_found("Job", "42")).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ErrorDetail>().is_none());
    }
}

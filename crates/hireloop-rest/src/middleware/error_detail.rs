//! Unredacted 5xx bodies for non-production deployments.

use crate::responses::ErrorDetail;
use axum::{
    body::Body,
    http::{header::CONTENT_LENGTH, Request},
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// Swaps the generic 5xx body for the underlying error message.
///
/// Only installed when the configuration enables detailed errors; without
/// it the [`ErrorDetail`] extension is dropped with the response.
pub async fn expose_error_details(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    let Some(ErrorDetail(detail)) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };

    let bytes = match serde_json::to_vec(&detail) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to encode detailed error body: {}", e);
            return response;
        }
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}

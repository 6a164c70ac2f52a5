//! Authentication middleware.

use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use hireloop_core::HireloopError;
use tracing::debug;

/// Why a presented bearer token was refused.
///
/// Stored in the request extensions so handlers that require a caller can
/// answer with the precise 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    Expired,
    Invalid(String),
}

impl From<AuthFailure> for HireloopError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::Expired => Self::TokenExpired,
            AuthFailure::Invalid(reason) => Self::InvalidToken(reason),
        }
    }
}

/// Validates `Authorization: Bearer` tokens.
///
/// Never rejects: valid claims are added to the request extensions,
/// failures are recorded as [`AuthFailure`], and each handler decides
/// whether it needs a caller.
pub async fn auth_middleware(State(state): State<AppState>, mut request: Request<Body>, next: Next) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    if let Some(token) = token {
        match state.token_provider.validate_token(token) {
            Ok(claims) => {
                debug!("Authenticated user: {}", claims.sub);
                request.extensions_mut().insert(claims);
            }
            Err(HireloopError::TokenExpired) => {
                debug!("Rejected expired token");
                request.extensions_mut().insert(AuthFailure::Expired);
            }
            Err(HireloopError::InvalidToken(reason)) => {
                debug!("Token validation failed: {}", reason);
                request.extensions_mut().insert(AuthFailure::Invalid(reason));
            }
            Err(e) => {
                debug!("Token validation failed: {}", e);
                request.extensions_mut().insert(AuthFailure::Invalid(e.to_string()));
            }
        }
    }

    next.run(request).await
}

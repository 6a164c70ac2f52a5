//! JWT claims extractor.

use crate::middleware::AuthFailure;
use crate::responses::AppError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use hireloop_core::{HireloopError, HireloopResult, UserId};
use hireloop_security::Claims;

/// Extractor for the authenticated caller.
///
/// The auth middleware validates the bearer token and stores the claims
/// in the request extensions; this extractor only reads them, rejecting
/// with 401 when they are missing.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    /// The caller's id, taken from the `sub` claim.
    pub fn user_id(&self) -> HireloopResult<UserId> {
        self.0.user_id()
    }
}

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(Self(claims.clone()));
        }

        // The middleware records why a presented token was refused.
        if let Some(failure) = parts.extensions.get::<AuthFailure>() {
            return Err(AppError(failure.clone().into()));
        }

        let message = match parts.headers.get(AUTHORIZATION) {
            None => "Missing authorization header",
            Some(_) => "Invalid authorization format",
        };
        Err(AppError(HireloopError::unauthorized(message)))
    }
}

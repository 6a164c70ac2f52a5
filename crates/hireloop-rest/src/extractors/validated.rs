//! Validated JSON extractor.
//!
//! Deserializes the body and runs its `validator` rules; both malformed
//! JSON and failed rules answer 400 with the error envelope.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use hireloop_core::{validation_errors_to_hireloop_error, HireloopError};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that validates the deserialized value.
///
/// ```ignore
/// async fn create_user(ValidatedJson(request): ValidatedJson<CreateUserRequest>) {
///     // request passed every validation rule
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError(HireloopError::validation(format!("Invalid request body: {}", rejection.body_text()))))?;

        value
            .validate()
            .map_err(|errors| AppError(validation_errors_to_hireloop_error(errors)))?;

        Ok(Self(value))
    }
}

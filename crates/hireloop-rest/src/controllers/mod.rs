//! REST API controllers.

pub mod application_controller;
pub mod health_controller;
pub mod job_controller;
pub mod user_controller;

use crate::responses::AppError;
use hireloop_core::HireloopError;

/// Parses a path id. A malformed id cannot name an existing row, so it is
/// reported as not found.
pub(crate) fn parse_id<T, E>(
    resource_type: &'static str,
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, AppError> {
    parse(raw).map_err(|_| AppError(HireloopError::not_found(resource_type, raw)))
}

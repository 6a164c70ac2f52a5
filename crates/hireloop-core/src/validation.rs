//! Validation utilities.

use crate::{FieldError, HireloopError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `HireloopError` on failure.
    fn validate_request(&self) -> Result<(), HireloopError> {
        self.validate().map_err(validation_errors_to_hireloop_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` into a `Validation` error that
/// keeps one `FieldError` per failed rule.
///
/// Struct-level (`__all__`) failures are reported under the field name
/// `body`.
#[must_use]
pub fn validation_errors_to_hireloop_error(errors: ValidationErrors) -> HireloopError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = if field == "__all__" { "body".to_string() } else { field.to_string() };
            errs.iter().map(move |error| FieldError {
                field: field.clone(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    HireloopError::validation_fields(message, field_errors)
}

/// Common validation functions.
pub mod rules {
    use std::borrow::Cow;
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank").with_message(Cow::Borrowed("must not be blank")));
        }
        Ok(())
    }

    /// Validates that a string parses as a UUID.
    pub fn uuid(value: &str) -> Result<(), ValidationError> {
        uuid::Uuid::parse_str(value)
            .map(|_| ())
            .map_err(|_| ValidationError::new("uuid").with_message(Cow::Borrowed("must be a valid UUID")))
    }

    /// Builds the error used when an update body carries no fields.
    #[must_use]
    pub fn empty_update() -> ValidationError {
        ValidationError::new("empty_update").with_message(Cow::Borrowed("at least one field must be provided"))
    }
}

//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Hireloop.
///
/// Each variant maps to exactly one HTTP status and one machine-readable
/// code, so the REST layer never has to inspect messages.
#[derive(Error, Debug)]
pub enum HireloopError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error, optionally with per-field details
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    /// A referenced record (job, candidate, recruiter) does not exist
    #[error("Related record not found: {0}")]
    InvalidReference(String),

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Authentication/Authorization Errors ============
    /// Unauthorized access
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden access
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HireloopError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation { .. } | Self::InvalidReference(_) => 400,
            Self::Conflict(_) => 409,
            Self::Unauthorized(_) | Self::InvalidToken(_) | Self::TokenExpired => 401,
            Self::Forbidden(_) => 403,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Cache(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for errors the client cannot fix by changing the request.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Field-level details attached to a validation error.
    #[must_use]
    pub fn details(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation { details, .. } if !details.is_empty() => Some(details),
            _ => None,
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error without field details.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Creates a validation error carrying per-field failures.
    #[must_use]
    pub fn validation_fields<T: Into<String>>(message: T, details: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for HireloopError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "Record",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                // PostgreSQL unique_violation
                Some("23505") => Self::Conflict(
                    db_err
                        .constraint()
                        .map_or_else(|| db_err.message().to_string(), |c| format!("duplicate value violates {c}")),
                ),
                // PostgreSQL foreign_key_violation
                Some("23503") => Self::InvalidReference(
                    db_err
                        .constraint()
                        .map_or_else(|| db_err.message().to_string(), ToString::to_string),
                ),
                _ => Self::Database(err.to_string()),
            },
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for HireloopError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {err}"))
    }
}

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(HireloopError::not_found("Job", 1).status_code(), 404);
        assert_eq!(HireloopError::validation("invalid email").status_code(), 400);
        assert_eq!(HireloopError::InvalidReference("jobs_recruiter_id_fkey".into()).status_code(), 400);
        assert_eq!(HireloopError::unauthorized("not logged in").status_code(), 401);
        assert_eq!(HireloopError::forbidden("not the owner").status_code(), 403);
        assert_eq!(HireloopError::conflict("duplicate").status_code(), 409);
        assert_eq!(HireloopError::TokenExpired.status_code(), 401);
        assert_eq!(HireloopError::Database("db error".to_string()).status_code(), 500);
        assert_eq!(HireloopError::Cache("redis down".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(HireloopError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(HireloopError::validation("bad input").error_code(), "VALIDATION_ERROR");
        assert_eq!(HireloopError::InvalidReference("fk".into()).error_code(), "INVALID_REFERENCE");
        assert_eq!(HireloopError::conflict("duplicate").error_code(), "CONFLICT");
        assert_eq!(HireloopError::forbidden("no").error_code(), "FORBIDDEN");
        assert_eq!(HireloopError::TokenExpired.error_code(), "TOKEN_EXPIRED");
        assert_eq!(HireloopError::internal("err").error_code(), "INTERNAL_ERROR");
        assert_eq!(HireloopError::Other(anyhow::anyhow!("boom")).error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_server_error_classification() {
        assert!(HireloopError::Database("x".into()).is_server_error());
        assert!(HireloopError::internal("x").is_server_error());
        assert!(!HireloopError::not_found("Job", "x").is_server_error());
        assert!(!HireloopError::conflict("x").is_server_error());
    }

    #[test]
    fn test_validation_details() {
        let plain = HireloopError::validation("bad");
        assert!(plain.details().is_none());

        let detailed = HireloopError::validation_fields(
            "email: invalid",
            vec![FieldError::new("email", "email", "must be a valid email")],
        );
        let details = detailed.details().unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "email");
    }

    #[test]
    fn test_not_found_message() {
        let err = HireloopError::not_found("Job", "abc");
        assert_eq!(err.to_string(), "Job not found: abc");
    }

    #[test]
    fn test_json_error_maps_to_internal() {
        let err: HireloopError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("JSON"));
    }
}

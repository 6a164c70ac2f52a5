//! User-related DTOs.

use hireloop_core::validation::rules;
use hireloop_core::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Name is required"), custom(function = "rules::not_blank"))]
    pub name: Option<String>,

    /// Defaults to `CANDIDATE`.
    #[serde(default)]
    pub role: Role,
}

/// Partial update of a user; at least one field must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_user_update"))]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Name cannot be empty"), custom(function = "rules::not_blank"))]
    pub name: Option<String>,

    pub role: Option<Role>,
}

impl UpdateUserRequest {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.role.is_none()
    }
}

fn validate_user_update(request: &UpdateUserRequest) -> Result<(), ValidationError> {
    if request.is_empty() {
        return Err(rules::empty_update());
    }
    Ok(())
}

//! User entity.

use crate::{Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate or recruiter account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: UserId,

    /// Unique across all users.
    pub email: String,

    pub name: Option<String>,

    pub role: Role,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh id and timestamps.
    #[must_use]
    pub fn new(email: String, name: Option<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            name,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name to show in listings, falling back to the email address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new("ana@hireloop.com".into(), None, Role::Recruiter);
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.display_name(), "ana@hireloop.com");
    }

    #[test]
    fn test_serializes_camel_case() {
        let user = User::new("ana@hireloop.com".into(), Some("Ana".into()), Role::Candidate);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["role"], "CANDIDATE");
    }
}

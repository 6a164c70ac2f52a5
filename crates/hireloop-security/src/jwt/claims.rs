//! JWT claims structure.

use chrono::{DateTime, Utc};
use hireloop_core::{HireloopError, HireloopResult, Role, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,

    pub email: String,

    pub role: Role,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// Not before timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    pub iss: String,

    pub aud: String,

    /// Unique identifier of this token.
    pub jti: String,
}

impl Claims {
    #[must_use]
    pub fn new(
        user_id: UserId,
        email: String,
        role: Role,
        issuer: String,
        audience: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email,
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            nbf: Some(now.timestamp()),
            iss: issuer,
            aud: audience,
            jti: Uuid::now_v7().to_string(),
        }
    }

    /// Parses the subject as a user ID.
    pub fn user_id(&self) -> HireloopResult<UserId> {
        UserId::parse(&self.sub).map_err(|_| HireloopError::InvalidToken("Subject is not a user ID".to_string()))
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    #[must_use]
    pub fn is_recruiter(&self) -> bool {
        self.role == Role::Recruiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(sub: UserId) -> Claims {
        Claims::new(
            sub,
            "rec@hireloop.com".to_string(),
            Role::Recruiter,
            "issuer".to_string(),
            "audience".to_string(),
            Utc::now() + Duration::hours(1),
        )
    }

    #[test]
    fn test_claims_subject_round_trips() {
        let id = UserId::new();
        let claims = claims(id);
        assert_eq!(claims.user_id().unwrap(), id);
        assert!(claims.is_recruiter());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_bad_subject() {
        let mut claims = claims(UserId::new());
        claims.sub = "42".to_string();
        assert_eq!(claims.user_id().unwrap_err().error_code(), "INVALID_TOKEN");
    }
}

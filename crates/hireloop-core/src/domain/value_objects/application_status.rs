//! Application status value object.

use super::text_enum;
use serde::{Deserialize, Serialize};

/// Where an application is in the hiring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Submitted, not yet looked at.
    #[default]
    Pending,
    Reviewed,
    Interviewing,
    Rejected,
    Offered,
}

text_enum!(ApplicationStatus, "status", {
    Pending => "PENDING",
    Reviewed => "REVIEWED",
    Interviewing => "INTERVIEWING",
    Rejected => "REJECTED",
    Offered => "OFFERED",
});

impl ApplicationStatus {
    /// Returns true once the pipeline has reached an outcome.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Rejected | Self::Offered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Pending);
        assert_eq!(ApplicationStatus::default().as_str(), "PENDING");
    }

    #[test]
    fn test_final_states() {
        assert!(ApplicationStatus::Offered.is_final());
        assert!(ApplicationStatus::Rejected.is_final());
        assert!(!ApplicationStatus::Interviewing.is_final());
    }

    #[test]
    fn test_deserialize() {
        let status: ApplicationStatus = serde_json::from_str("\"INTERVIEWING\"").unwrap();
        assert_eq!(status, ApplicationStatus::Interviewing);
        assert!(serde_json::from_str::<ApplicationStatus>("\"pending\"").is_err());
    }
}

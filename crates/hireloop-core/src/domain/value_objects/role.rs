//! User role value object.

use super::text_enum;
use serde::{Deserialize, Serialize};

/// What a user does on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Browses and applies to jobs.
    #[default]
    Candidate,
    /// Posts jobs and reviews applications.
    Recruiter,
}

text_enum!(Role, "role", {
    Candidate => "CANDIDATE",
    Recruiter => "RECRUITER",
});

impl Role {
    #[must_use]
    pub const fn can_post_jobs(&self) -> bool {
        matches!(self, Self::Recruiter)
    }
}

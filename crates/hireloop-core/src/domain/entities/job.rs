//! Job posting entity.

use crate::{ExperienceLevel, JobId, JobType, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posted by a recruiter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    /// Free-form, e.g. "$120k - $150k".
    pub salary: Option<String>,
    pub description: String,
    pub application_url: Option<String>,
    /// Owner of the posting; only they may edit or delete it.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub recruiter_id: UserId,
    pub posted_at: DateTime<Utc>,
}

impl Job {
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.recruiter_id == user
    }
}

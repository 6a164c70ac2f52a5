//! Application entity.

use crate::{ApplicationId, ApplicationStatus, JobId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate's application to a job. At most one per (job, candidate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: ApplicationId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub job_id: JobId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub candidate_id: UserId,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

impl Application {
    /// A fresh, pending application.
    #[must_use]
    pub fn new(job_id: JobId, candidate_id: UserId) -> Self {
        Self {
            id: ApplicationId::new(),
            job_id,
            candidate_id,
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
        }
    }
}

//! Application DTOs.

use hireloop_core::validation::rules;
use hireloop_core::ApplicationStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A candidate applying to a job.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    #[validate(custom(function = "rules::uuid", message = "Invalid job ID"))]
    pub job_id: String,

    #[validate(custom(function = "rules::uuid", message = "Invalid candidate ID"))]
    pub candidate_id: String,
}

/// Moves an application to a new status.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    pub status: ApplicationStatus,
}

//! Job posting DTOs.

use hireloop_core::validation::rules;
use hireloop_core::{ExperienceLevel, JobType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Request to post a new job.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "Title is required"), custom(function = "rules::not_blank"))]
    pub title: String,

    #[validate(length(min = 1, message = "Company is required"), custom(function = "rules::not_blank"))]
    pub company: String,

    #[validate(length(min = 1, message = "Location is required"), custom(function = "rules::not_blank"))]
    pub location: String,

    pub job_type: JobType,

    pub experience_level: ExperienceLevel,

    pub salary: Option<String>,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,

    #[validate(url(message = "Invalid URL format"))]
    pub application_url: Option<String>,

    #[validate(custom(function = "rules::uuid", message = "Invalid recruiter ID"))]
    pub recruiter_id: String,
}

/// Partial update of a job; at least one field must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_job_update"))]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"), custom(function = "rules::not_blank"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Company cannot be empty"), custom(function = "rules::not_blank"))]
    pub company: Option<String>,

    #[validate(length(min = 1, message = "Location cannot be empty"), custom(function = "rules::not_blank"))]
    pub location: Option<String>,

    pub job_type: Option<JobType>,

    pub experience_level: Option<ExperienceLevel>,

    pub salary: Option<String>,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub application_url: Option<String>,
}

impl UpdateJobRequest {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.company.is_none()
            && self.location.is_none()
            && self.job_type.is_none()
            && self.experience_level.is_none()
            && self.salary.is_none()
            && self.description.is_none()
            && self.application_url.is_none()
    }
}

fn validate_job_update(request: &UpdateJobRequest) -> Result<(), ValidationError> {
    if request.is_empty() {
        return Err(rules::empty_update());
    }
    Ok(())
}

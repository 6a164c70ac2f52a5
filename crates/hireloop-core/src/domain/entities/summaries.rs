//! Reduced projections returned by list and detail endpoints.
//!
//! These are what gets cached, so they must round-trip through JSON.

use crate::{ApplicationId, ApplicationStatus, ExperienceLevel, JobId, JobType, Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `{id, name, email}` of a recruiter or candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PersonRef {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
}

/// Row of `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub job_count: u64,
    pub application_count: u64,
}

/// Row of `GET /api/jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub salary: Option<String>,
    pub description: String,
    pub application_url: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub recruiter: PersonRef,
    pub application_count: u64,
}

/// Job fields embedded in an application row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JobRef {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
}

/// Row of `GET /api/applications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: ApplicationId,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub job: JobRef,
    pub candidate: PersonRef,
}

/// An application as listed under its job's detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JobApplicant {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: ApplicationId,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub candidate: PersonRef,
}

/// `GET /api/jobs/:id`: the posting, its recruiter, and its applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: crate::Job,
    pub recruiter: PersonRef,
    pub applications: Vec<JobApplicant>,
}

//! OpenAPI documentation, served as JSON at `/api-docs/openapi.json`.
//!
//! Response bodies are documented unwrapped; every one travels in the
//! `data` field of the success envelope.

use crate::controllers::health_controller::{ComponentHealth, HealthResponse, ReadinessResponse};
use crate::responses::{CacheCleared, DeletedResource, ErrorBody, ResponseMeta};
use hireloop_core::{
    Application, ApplicationStatus, ApplicationSummary, ExperienceLevel, FieldError, Job, JobApplicant, JobDetail,
    JobRef, JobSummary, JobType, PageInfo, PersonRef, Role, User, UserSummary,
};
use hireloop_service::{
    CreateApplicationRequest, CreateJobRequest, CreateUserRequest, UpdateApplicationRequest, UpdateJobRequest,
    UpdateUserRequest,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hireloop API",
        version = "1.0.0",
        description = "Job board API: users, job postings and applications"
    ),
    paths(
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::list_users_cached,
        crate::controllers::user_controller::clear_user_cache,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::job_controller::list_jobs,
        crate::controllers::job_controller::list_jobs_cached,
        crate::controllers::job_controller::clear_job_cache,
        crate::controllers::job_controller::list_my_jobs,
        crate::controllers::job_controller::create_job,
        crate::controllers::job_controller::get_job,
        crate::controllers::job_controller::update_job,
        crate::controllers::job_controller::delete_job,
        crate::controllers::application_controller::list_applications,
        crate::controllers::application_controller::create_application,
        crate::controllers::application_controller::get_application,
        crate::controllers::application_controller::update_application,
        crate::controllers::application_controller::delete_application,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            Role,
            JobType,
            ExperienceLevel,
            ApplicationStatus,
            User,
            UserSummary,
            Job,
            JobSummary,
            JobDetail,
            JobApplicant,
            JobRef,
            PersonRef,
            Application,
            ApplicationSummary,
            PageInfo,
            FieldError,
            ErrorBody,
            ResponseMeta,
            CacheCleared,
            DeletedResource,
            CreateUserRequest,
            UpdateUserRequest,
            CreateJobRequest,
            UpdateJobRequest,
            CreateApplicationRequest,
            UpdateApplicationRequest,
            HealthResponse,
            ComponentHealth,
            ReadinessResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "Candidates and recruiters"),
        (name = "jobs", description = "Job postings"),
        (name = "applications", description = "Applications to job postings"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;

/// Registers the bearer scheme used by job ownership endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token authentication"))
                        .build(),
                ),
            );
        }
    }
}

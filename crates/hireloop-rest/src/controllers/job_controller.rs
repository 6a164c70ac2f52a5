//! Job posting controller.

use super::parse_id;
use crate::{
    extractors::{AuthenticatedUser, JobFilters, ListParams, ValidatedJson},
    responses::{
        created, ok, ok_with_message, ApiResponse, ApiResult, CacheCleared, CreatedResult, DeletedResource,
        ErrorBody, ResponseMeta,
    },
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use hireloop_core::{Job, JobDetail, JobId, JobSummary, Page};
use hireloop_service::{CreateJobRequest, UpdateJobRequest};
use std::time::Instant;
use tracing::debug;

/// Creates the job router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/cached", get(list_jobs_cached).delete(clear_job_cache))
        .route("/mine", get(list_my_jobs))
        .route("/:id", get(get_job).put(update_job).delete(delete_job))
}

/// List jobs, newest first.
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "jobs",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 10, max 100"),
        ("jobType" = Option<String>, Query, description = "FULL_TIME, PART_TIME, CONTRACT or INTERNSHIP"),
        ("experienceLevel" = Option<String>, Query, description = "ENTRY_LEVEL, MID_LEVEL, SENIOR or MANAGER"),
        ("recruiterId" = Option<String>, Query, description = "Posting recruiter"),
    ),
    responses((status = 200, description = "One page of jobs", body = Page<JobSummary>))
)]
pub async fn list_jobs(State(state): State<AppState>, params: ListParams<JobFilters>) -> ApiResult<Page<JobSummary>> {
    let page = state.job_service.list_jobs(&params.query).await?;
    ok(page)
}

/// List jobs through the cache.
#[utoipa::path(
    get,
    path = "/api/jobs/cached",
    tag = "jobs",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 10, max 100"),
        ("jobType" = Option<String>, Query, description = "FULL_TIME, PART_TIME, CONTRACT or INTERNSHIP"),
        ("experienceLevel" = Option<String>, Query, description = "ENTRY_LEVEL, MID_LEVEL, SENIOR or MANAGER"),
        ("recruiterId" = Option<String>, Query, description = "Posting recruiter"),
    ),
    responses((status = 200, description = "One page of jobs with cache metadata", body = Page<JobSummary>))
)]
pub async fn list_jobs_cached(
    State(state): State<AppState>,
    params: ListParams<JobFilters>,
) -> ApiResult<Page<JobSummary>> {
    let start = Instant::now();
    let result = state.job_service.list_jobs_cached(&params.query).await?;
    let meta = ResponseMeta::new(result.cached, start.elapsed(), state.list_ttl);

    debug!("Cached job list served (cached: {})", result.cached);
    Ok(Json(ApiResponse::success(result.value).with_meta(meta)))
}

/// Drop every cached job page.
#[utoipa::path(
    delete,
    path = "/api/jobs/cached",
    tag = "jobs",
    responses((status = 200, description = "Cache cleared", body = CacheCleared))
)]
pub async fn clear_job_cache(State(state): State<AppState>) -> ApiResult<CacheCleared> {
    let deleted_keys = state.job_service.invalidate_job_cache().await;
    ok_with_message(CacheCleared { deleted_keys }, "Job cache invalidated")
}

/// The caller's own postings.
#[utoipa::path(
    get,
    path = "/api/jobs/mine",
    tag = "jobs",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 10, max 100"),
        ("jobType" = Option<String>, Query, description = "FULL_TIME, PART_TIME, CONTRACT or INTERNSHIP"),
        ("experienceLevel" = Option<String>, Query, description = "ENTRY_LEVEL, MID_LEVEL, SENIOR or MANAGER"),
    ),
    responses(
        (status = 200, description = "One page of the caller's jobs", body = Page<JobSummary>),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_my_jobs(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    params: ListParams<JobFilters>,
) -> ApiResult<Page<JobSummary>> {
    let recruiter = user.user_id()?;
    let page = state.job_service.list_jobs_for_recruiter(recruiter, &params.query).await?;
    ok(page)
}

/// Post a job.
#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job created", body = Job),
        (status = 400, description = "Invalid request or unknown recruiter", body = ErrorBody),
    )
)]
pub async fn create_job(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateJobRequest>,
) -> CreatedResult<Job> {
    let job = state.job_service.create_job(request).await?;
    created(job, "Job created successfully")
}

/// Get a job with its recruiter and applications.
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "The job", body = JobDetail),
        (status = 404, description = "No such job", body = ErrorBody),
    )
)]
pub async fn get_job(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<JobDetail> {
    let id = parse_id("Job", &id, JobId::parse)?;
    let job = state.job_service.get_job(id).await?;
    ok(job)
}

/// Update a job. Only its recruiter may.
#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job id")),
    request_body = UpdateJobRequest,
    responses(
        (status = 200, description = "Job updated", body = Job),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller did not post this job", body = ErrorBody),
        (status = 404, description = "No such job", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateJobRequest>,
) -> ApiResult<Job> {
    let id = parse_id("Job", &id, JobId::parse)?;
    let job = state.job_service.update_job(user.user_id()?, id, request).await?;
    ok_with_message(job, "Job updated successfully")
}

/// Delete a job and its applications. Only its recruiter may.
#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job deleted", body = DeletedResource),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller did not post this job", body = ErrorBody),
        (status = 404, description = "No such job", body = ErrorBody),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_job(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<DeletedResource> {
    let job_id = parse_id("Job", &id, JobId::parse)?;
    state.job_service.delete_job(user.user_id()?, job_id).await?;
    ok_with_message(DeletedResource { id }, "Job deleted successfully")
}

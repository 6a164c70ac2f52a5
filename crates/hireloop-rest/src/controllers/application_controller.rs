//! Application controller.

use super::parse_id;
use crate::{
    extractors::{ApplicationFilters, ListParams, ValidatedJson},
    responses::{created, ok, ok_with_message, ApiResult, CreatedResult, DeletedResource, ErrorBody},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use hireloop_core::{Application, ApplicationId, ApplicationSummary, Page};
use hireloop_service::{CreateApplicationRequest, UpdateApplicationRequest};

/// Creates the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_applications).post(create_application))
        .route(
            "/:id",
            get(get_application).patch(update_application).delete(delete_application),
        )
}

/// List applications, newest first.
#[utoipa::path(
    get,
    path = "/api/applications",
    tag = "applications",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 10, max 100"),
        ("status" = Option<String>, Query, description = "PENDING, REVIEWED, INTERVIEWING, REJECTED or OFFERED"),
        ("jobId" = Option<String>, Query, description = "Applied-to job"),
        ("candidateId" = Option<String>, Query, description = "Applying candidate"),
    ),
    responses((status = 200, description = "One page of applications", body = Page<ApplicationSummary>))
)]
pub async fn list_applications(
    State(state): State<AppState>,
    params: ListParams<ApplicationFilters>,
) -> ApiResult<Page<ApplicationSummary>> {
    let page = state.application_service.list_applications(&params.query).await?;
    ok(page)
}

/// Apply to a job.
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = "applications",
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 400, description = "Invalid request or unknown job or candidate", body = ErrorBody),
        (status = 409, description = "Candidate already applied", body = ErrorBody),
    )
)]
pub async fn create_application(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateApplicationRequest>,
) -> CreatedResult<Application> {
    let application = state.application_service.create_application(request).await?;
    created(application, "Application submitted successfully")
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    tag = "applications",
    params(("id" = String, Path, description = "Application id")),
    responses(
        (status = 200, description = "The application", body = Application),
        (status = 404, description = "No such application", body = ErrorBody),
    )
)]
pub async fn get_application(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Application> {
    let id = parse_id("Application", &id, ApplicationId::parse)?;
    let application = state.application_service.get_application(id).await?;
    ok(application)
}

/// Move an application to a new status.
#[utoipa::path(
    patch,
    path = "/api/applications/{id}",
    tag = "applications",
    params(("id" = String, Path, description = "Application id")),
    request_body = UpdateApplicationRequest,
    responses(
        (status = 200, description = "Status updated", body = Application),
        (status = 400, description = "Unknown status", body = ErrorBody),
        (status = 404, description = "No such application", body = ErrorBody),
    )
)]
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateApplicationRequest>,
) -> ApiResult<Application> {
    let id = parse_id("Application", &id, ApplicationId::parse)?;
    let application = state.application_service.update_application_status(id, request).await?;
    ok_with_message(application, "Application updated successfully")
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    tag = "applications",
    params(("id" = String, Path, description = "Application id")),
    responses(
        (status = 200, description = "Application withdrawn", body = DeletedResource),
        (status = 404, description = "No such application", body = ErrorBody),
    )
)]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeletedResource> {
    let application_id = parse_id("Application", &id, ApplicationId::parse)?;
    state.application_service.delete_application(application_id).await?;
    ok_with_message(DeletedResource { id }, "Application deleted successfully")
}

//! User controller.

use super::parse_id;
use crate::{
    extractors::{ListParams, UserFilters, ValidatedJson},
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
use hireloop_core::{Page, User, UserId, UserSummary};
use hireloop_service::{CreateUserRequest, UpdateUserRequest};
use std::time::Instant;
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/cached", get(list_users_cached).delete(clear_user_cache))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List users, newest first.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 10, max 100"),
        ("role" = Option<String>, Query, description = "CANDIDATE or RECRUITER"),
    ),
    responses((status = 200, description = "One page of users", body = Page<UserSummary>))
)]
pub async fn list_users(
    State(state): State<AppState>,
    params: ListParams<UserFilters>,
) -> ApiResult<Page<UserSummary>> {
    let page = state.user_service.list_users(&params.query).await?;
    ok(page)
}

/// List users through the cache.
#[utoipa::path(
    get,
    path = "/api/users/cached",
    tag = "users",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 10, max 100"),
        ("role" = Option<String>, Query, description = "CANDIDATE or RECRUITER"),
    ),
    responses((status = 200, description = "One page of users with cache metadata", body = Page<UserSummary>))
)]
pub async fn list_users_cached(
    State(state): State<AppState>,
    params: ListParams<UserFilters>,
) -> ApiResult<Page<UserSummary>> {
    let start = Instant::now();
    let result = state.user_service.list_users_cached(&params.query).await?;
    let meta = ResponseMeta::new(result.cached, start.elapsed(), state.list_ttl);

    debug!("Cached user list served (cached: {})", result.cached);
    Ok(Json(ApiResponse::success(result.value).with_meta(meta)))
}

/// Drop every cached user page.
#[utoipa::path(
    delete,
    path = "/api/users/cached",
    tag = "users",
    responses((status = 200, description = "Cache cleared", body = CacheCleared))
)]
pub async fn clear_user_cache(State(state): State<AppState>) -> ApiResult<CacheCleared> {
    let deleted_keys = state.user_service.invalidate_user_cache().await;
    ok_with_message(CacheCleared { deleted_keys }, "User cache invalidated")
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> CreatedResult<User> {
    let user = state.user_service.create_user(request).await?;
    created(user, "User created successfully")
}

/// Get a user by id.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    let id = parse_id("User", &id, UserId::parse)?;
    let user = state.user_service.get_user(id).await?;
    ok(user)
}

/// Update a user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<User> {
    let id = parse_id("User", &id, UserId::parse)?;
    let user = state.user_service.update_user(id, request).await?;
    ok_with_message(user, "User updated successfully")
}

/// Delete a user with their postings and applications.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = DeletedResource),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<DeletedResource> {
    let user_id = parse_id("User", &id, UserId::parse)?;
    state.user_service.delete_user(user_id).await?;
    ok_with_message(DeletedResource { id }, "User deleted successfully")
}

//! Router-level tests for the list, cache and envelope behaviour.

mod common;

use axum::http::{Method, StatusCode};
use common::app;
use hireloop_core::Role;
use serde_json::json;

#[tokio::test]
async fn test_health_uses_envelope() {
    let app = app();
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_components() {
    let app = app();
    let (status, body) = app.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["components"][0]["name"], "cache");
    assert_eq!(body["data"]["components"][0]["status"], "up");

    app.cache.set_failing(true);
    let (status, body) = app.get("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_list_envelope_shape() {
    let app = app();
    app.create_user("ana@hireloop.com", Role::Candidate).await;

    let (status, body) = app.get("/api/users").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(
        body["data"]["pagination"],
        json!({"page": 1, "limit": 10, "total": 1, "totalPages": 1})
    );
    assert!(body.get("meta").is_none());
}

#[tokio::test]
async fn test_out_of_range_pagination_is_clamped() {
    let app = app();
    let (status, body) = app.get("/api/users?page=0&limit=500").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["page"], 1);
    assert_eq!(body["data"]["pagination"]["limit"], 100);
}

#[tokio::test]
async fn test_garbage_pagination_uses_defaults() {
    let app = app();
    let (_, body) = app.get("/api/jobs?page=abc&limit=2.5").await;

    assert_eq!(body["data"]["pagination"]["page"], 1);
    assert_eq!(body["data"]["pagination"]["limit"], 10);
}

#[tokio::test]
async fn test_pages_split_results() {
    let app = app();
    for i in 0..3 {
        app.create_user(&format!("user{i}@hireloop.com"), Role::Candidate).await;
    }

    let (_, body) = app.get("/api/users?page=2&limit=2").await;

    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["pagination"]["total"], 3);
    assert_eq!(body["data"]["pagination"]["totalPages"], 2);
}

#[tokio::test]
async fn test_role_filter() {
    let app = app();
    app.create_user("rita@hireloop.com", Role::Recruiter).await;
    app.create_user("cam@hireloop.com", Role::Candidate).await;

    let (_, body) = app.get("/api/users?role=RECRUITER").await;

    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["email"], "rita@hireloop.com");
    assert_eq!(items[0]["role"], "RECRUITER");
}

#[tokio::test]
async fn test_status_filter_without_matches_is_empty() {
    let app = app();
    let recruiter = app.create_user("rita@hireloop.com", Role::Recruiter).await;
    let candidate = app.create_user("cam@hireloop.com", Role::Candidate).await;
    let job = app.create_job(&recruiter, "FULL_TIME").await;

    let (status, body) = app
        .post("/api/applications", json!({"jobId": job, "candidateId": candidate}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let application = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/applications/{application}"),
            Some(json!({"status": "REVIEWED"})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/applications?status=PENDING").await;
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["pagination"]["total"], 0);
    assert_eq!(body["data"]["pagination"]["totalPages"], 0);

    let (_, body) = app.get("/api/applications?status=REVIEWED").await;
    assert_eq!(body["data"]["items"][0]["job"]["id"], job.as_str());
    assert_eq!(body["data"]["items"][0]["candidate"]["email"], "cam@hireloop.com");
}

#[tokio::test]
async fn test_malformed_filter_value_yields_empty_page() {
    let app = app();
    let (status, body) = app.get("/api/applications?jobId=not-a-uuid").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_cached_list_reports_hit_on_repeat() {
    let app = app();
    app.create_user("rita@hireloop.com", Role::Recruiter).await;
    let uri = "/api/users/cached?role=RECRUITER&page=1&limit=10";

    let (status, first) = app.get(uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["meta"]["cached"], false);
    assert_eq!(first["meta"]["ttlSeconds"], 60);
    assert!(first["meta"]["responseTimeMs"].is_u64());

    let (_, second) = app.get(uri).await;
    assert_eq!(second["meta"]["cached"], true);
    assert_eq!(second["data"], first["data"]);
    assert_eq!(app.store.list_reads(), 1);
}

#[tokio::test]
async fn test_cached_key_ignores_parameter_order() {
    let app = app();
    app.get("/api/jobs/cached?jobType=CONTRACT&experienceLevel=SENIOR").await;
    let (_, body) = app.get("/api/jobs/cached?experienceLevel=SENIOR&jobType=CONTRACT").await;

    assert_eq!(body["meta"]["cached"], true);
}

#[tokio::test]
async fn test_cached_list_survives_cache_outage() {
    let app = app();
    app.cache.set_failing(true);

    let (status, body) = app.get("/api/users/cached").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["cached"], false);

    let (status, body) = app.request(Method::DELETE, "/api/users/cached", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deletedKeys"], 0);
}

#[tokio::test]
async fn test_stale_until_explicit_invalidation_when_flag_off() {
    let app = common::app_with(false);
    app.get("/api/users/cached").await;
    app.create_user("late@hireloop.com", Role::Candidate).await;

    let (_, stale) = app.get("/api/users/cached").await;
    assert_eq!(stale["meta"]["cached"], true);
    assert_eq!(stale["data"]["pagination"]["total"], 0);

    let (status, cleared) = app.request(Method::DELETE, "/api/users/cached", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["data"]["deletedKeys"], 1);

    let (_, fresh) = app.get("/api/users/cached").await;
    assert_eq!(fresh["meta"]["cached"], false);
    assert_eq!(fresh["data"]["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_writes_refresh_cached_lists_by_default() {
    let app = app();
    let recruiter = app.create_user("rita@hireloop.com", Role::Recruiter).await;
    app.get("/api/jobs/cached").await;

    app.create_job(&recruiter, "CONTRACT").await;

    let (_, body) = app.get("/api/jobs/cached").await;
    assert_eq!(body["meta"]["cached"], false);
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["recruiter"]["email"], "rita@hireloop.com");
}

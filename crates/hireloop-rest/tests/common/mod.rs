//! Shared harness: the real router over in-memory repositories and cache.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use hireloop_config::{SecurityConfig, ServerConfig};
use hireloop_core::{Role, UserId};
use hireloop_repository::memory::InMemoryStore;
use hireloop_rest::{create_router, AppState};
use hireloop_security::TokenProvider;
use hireloop_service::{ApplicationServiceImpl, InMemoryCache, JobServiceImpl, ListCache, UserServiceImpl};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub cache: Arc<InMemoryCache>,
    pub tokens: Arc<TokenProvider>,
}

pub fn app() -> TestApp {
    app_with(true)
}

pub fn app_with(invalidate_on_write: bool) -> TestApp {
    let store = InMemoryStore::new();
    let cache = InMemoryCache::new();
    let list_cache = Arc::new(ListCache::new(cache.clone(), Duration::from_secs(60)));
    let tokens = Arc::new(TokenProvider::new(Arc::new(SecurityConfig::default())));

    let state = AppState::new(
        Arc::new(UserServiceImpl::new(store.user_repository(), list_cache.clone(), invalidate_on_write)),
        Arc::new(JobServiceImpl::new(store.job_repository(), list_cache.clone(), invalidate_on_write)),
        Arc::new(ApplicationServiceImpl::new(
            store.application_repository(),
            list_cache,
            invalidate_on_write,
        )),
        tokens.clone(),
    )
    .with_health_check(cache.clone());

    TestApp {
        router: create_router(state, &ServerConfig::default()),
        store,
        cache,
        tokens,
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    /// Creates a user over HTTP and returns its id.
    pub async fn create_user(&self, email: &str, role: Role) -> String {
        let (status, body) = self
            .post("/api/users", json!({"email": email, "name": email.split('@').next(), "role": role}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Posts a job over HTTP and returns its id.
    pub async fn create_job(&self, recruiter_id: &str, job_type: &str) -> String {
        let (status, body) = self
            .post(
                "/api/jobs",
                json!({
                    "title": "Backend Engineer",
                    "company": "Hireloop",
                    "location": "Remote",
                    "jobType": job_type,
                    "experienceLevel": "SENIOR",
                    "description": "Build and run the job board API.",
                    "recruiterId": recruiter_id,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    pub fn token_for(&self, user_id: &str, role: Role) -> String {
        let id = UserId::parse(user_id).unwrap();
        self.tokens.generate_token(id, "someone@hireloop.com", role).unwrap()
    }
}

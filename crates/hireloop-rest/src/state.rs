//! Application state for Axum handlers.

use axum::extract::FromRef;
use hireloop_core::{HealthCheck, PageLimits};
use hireloop_security::TokenProvider;
use hireloop_service::{ApplicationService, JobService, UserService};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub job_service: Arc<dyn JobService>,
    pub application_service: Arc<dyn ApplicationService>,
    pub token_provider: Arc<TokenProvider>,
    pub page_limits: PageLimits,
    /// Reported as `ttlSeconds` on cached list responses.
    pub list_ttl: Duration,
    /// Dependencies probed by `/ready`.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    /// Whether 5xx responses carry the underlying error message.
    pub detailed_errors: bool,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserService>,
        job_service: Arc<dyn JobService>,
        application_service: Arc<dyn ApplicationService>,
        token_provider: Arc<TokenProvider>,
    ) -> Self {
        Self {
            user_service,
            job_service,
            application_service,
            token_provider,
            page_limits: PageLimits::default(),
            list_ttl: Duration::from_secs(60),
            health_checks: Vec::new(),
            detailed_errors: false,
        }
    }

    #[must_use]
    pub fn with_page_limits(mut self, page_limits: PageLimits) -> Self {
        self.page_limits = page_limits;
        self
    }

    #[must_use]
    pub fn with_list_ttl(mut self, list_ttl: Duration) -> Self {
        self.list_ttl = list_ttl;
        self
    }

    #[must_use]
    pub fn with_detailed_errors(mut self, detailed_errors: bool) -> Self {
        self.detailed_errors = detailed_errors;
        self
    }

    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}

impl FromRef<AppState> for PageLimits {
    fn from_ref(state: &AppState) -> Self {
        state.page_limits
    }
}

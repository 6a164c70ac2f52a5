//! Application service trait definition.

use crate::dto::{CreateApplicationRequest, UpdateApplicationRequest};
use async_trait::async_trait;
use hireloop_core::{Application, ApplicationId, ApplicationSummary, HireloopResult, ListQuery, Page};

/// Application service trait.
#[async_trait]
pub trait ApplicationService: Send + Sync {
    async fn list_applications(&self, query: &ListQuery) -> HireloopResult<Page<ApplicationSummary>>;

    async fn get_application(&self, id: ApplicationId) -> HireloopResult<Application>;

    /// Applies a candidate to a job; applying twice is a conflict.
    async fn create_application(&self, request: CreateApplicationRequest) -> HireloopResult<Application>;

    async fn update_application_status(
        &self,
        id: ApplicationId,
        request: UpdateApplicationRequest,
    ) -> HireloopResult<Application>;

    async fn delete_application(&self, id: ApplicationId) -> HireloopResult<()>;
}

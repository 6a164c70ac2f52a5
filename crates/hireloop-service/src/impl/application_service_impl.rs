//! Application service implementation.

use super::WriteInvalidation;
use crate::application_service::ApplicationService;
use crate::cache::{cache_keys::endpoints, ListCache};
use crate::dto::{CreateApplicationRequest, UpdateApplicationRequest};
use async_trait::async_trait;
use hireloop_core::{
    Application, ApplicationId, ApplicationSummary, HireloopError, HireloopResult, JobId, ListQuery, Page, UserId,
    ValidateExt,
};
use hireloop_repository::ApplicationRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Applications are counted on both job and user pages.
const AFFECTED: &[&str] = &[endpoints::JOBS, endpoints::USERS];

pub struct ApplicationServiceImpl {
    application_repository: Arc<dyn ApplicationRepository>,
    invalidation: WriteInvalidation,
}

impl ApplicationServiceImpl {
    pub fn new(
        application_repository: Arc<dyn ApplicationRepository>,
        list_cache: Arc<ListCache>,
        invalidate_on_write: bool,
    ) -> Self {
        Self {
            application_repository,
            invalidation: WriteInvalidation::new(list_cache, invalidate_on_write),
        }
    }
}

#[async_trait]
impl ApplicationService for ApplicationServiceImpl {
    async fn list_applications(&self, query: &ListQuery) -> HireloopResult<Page<ApplicationSummary>> {
        debug!("Listing applications, page: {}, limit: {}", query.page.page, query.page.limit);
        self.application_repository.list(query).await
    }

    async fn get_application(&self, id: ApplicationId) -> HireloopResult<Application> {
        debug!("Getting application: {}", id);

        self.application_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| HireloopError::not_found("Application", id))
    }

    async fn create_application(&self, request: CreateApplicationRequest) -> HireloopResult<Application> {
        request.validate_request()?;

        let job_id = JobId::parse(&request.job_id).map_err(|_| HireloopError::validation("Invalid job ID"))?;
        let candidate_id =
            UserId::parse(&request.candidate_id).map_err(|_| HireloopError::validation("Invalid candidate ID"))?;

        debug!("Candidate {} applying to job {}", candidate_id, job_id);

        let saved = self
            .application_repository
            .create(&Application::new(job_id, candidate_id))
            .await
            .map_err(|e| match e {
                HireloopError::Conflict(_) => {
                    HireloopError::conflict("Candidate has already applied to this job")
                }
                other => other,
            })?;

        info!("Application created: {}", saved.id);
        self.invalidation.after_write(AFFECTED).await;
        Ok(saved)
    }

    async fn update_application_status(
        &self,
        id: ApplicationId,
        request: UpdateApplicationRequest,
    ) -> HireloopResult<Application> {
        debug!("Updating application {} to {}", id, request.status);

        let updated = self
            .application_repository
            .update_status(id, request.status)
            .await?
            .ok_or_else(|| HireloopError::not_found("Application", id))?;

        info!("Application {} is now {}", id, updated.status);
        self.invalidation.after_write(AFFECTED).await;
        Ok(updated)
    }

    async fn delete_application(&self, id: ApplicationId) -> HireloopResult<()> {
        debug!("Deleting application: {}", id);

        if !self.application_repository.delete(id).await? {
            return Err(HireloopError::not_found("Application", id));
        }

        info!("Application deleted: {}", id);
        self.invalidation.after_write(AFFECTED).await;
        Ok(())
    }
}

//! Job service implementation.

use super::WriteInvalidation;
use crate::cache::{cache_keys::endpoints, Cached, ListCache};
use crate::dto::{CreateJobRequest, UpdateJobRequest};
use crate::job_service::JobService;
use async_trait::async_trait;
use chrono::Utc;
use hireloop_core::{
    HireloopError, HireloopResult, Job, JobDetail, JobId, JobSummary, ListQuery, Page, UserId, ValidateExt,
};
use hireloop_repository::JobRepository;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Job pages, plus user pages for their job counts.
const AFFECTED: &[&str] = &[endpoints::JOBS, endpoints::USERS];

pub struct JobServiceImpl {
    job_repository: Arc<dyn JobRepository>,
    invalidation: WriteInvalidation,
}

impl JobServiceImpl {
    pub fn new(job_repository: Arc<dyn JobRepository>, list_cache: Arc<ListCache>, invalidate_on_write: bool) -> Self {
        Self {
            job_repository,
            invalidation: WriteInvalidation::new(list_cache, invalidate_on_write),
        }
    }

    /// Loads a job and checks that `caller` posted it.
    async fn owned_job(&self, caller: UserId, id: JobId) -> HireloopResult<Job> {
        let job = self
            .job_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| HireloopError::not_found("Job", id))?;

        if !job.is_owned_by(caller) {
            warn!("User {} attempted to modify job {} owned by {}", caller, id, job.recruiter_id);
            return Err(HireloopError::forbidden("Only the recruiter who posted this job can modify it"));
        }

        Ok(job)
    }
}

#[async_trait]
impl JobService for JobServiceImpl {
    async fn list_jobs(&self, query: &ListQuery) -> HireloopResult<Page<JobSummary>> {
        debug!("Listing jobs, page: {}, limit: {}", query.page.page, query.page.limit);
        self.job_repository.list(query).await
    }

    async fn list_jobs_cached(&self, query: &ListQuery) -> HireloopResult<Cached<Page<JobSummary>>> {
        self.invalidation
            .list_cache()
            .get_or_load(endpoints::JOBS, query, || self.job_repository.list(query))
            .await
    }

    async fn invalidate_job_cache(&self) -> u64 {
        let deleted = self.invalidation.list_cache().invalidate(endpoints::JOBS).await;
        info!("Job list cache cleared ({} keys)", deleted);
        deleted
    }

    async fn list_jobs_for_recruiter(&self, recruiter: UserId, query: &ListQuery) -> HireloopResult<Page<JobSummary>> {
        let scoped = ListQuery::new(query.page, query.filters.clone().with("recruiterId", recruiter.to_string()));
        self.list_jobs(&scoped).await
    }

    async fn get_job(&self, id: JobId) -> HireloopResult<JobDetail> {
        debug!("Getting job: {}", id);

        self.job_repository
            .find_detail(id)
            .await?
            .ok_or_else(|| HireloopError::not_found("Job", id))
    }

    async fn create_job(&self, request: CreateJobRequest) -> HireloopResult<Job> {
        debug!("Creating job: {}", request.title);

        request.validate_request()?;

        let recruiter_id = UserId::parse(&request.recruiter_id)
            .map_err(|_| HireloopError::validation("Invalid recruiter ID"))?;

        let job = Job {
            id: JobId::new(),
            title: request.title,
            company: request.company,
            location: request.location,
            job_type: request.job_type,
            experience_level: request.experience_level,
            salary: request.salary,
            description: request.description,
            application_url: request.application_url,
            recruiter_id,
            posted_at: Utc::now(),
        };
        let saved = self.job_repository.create(&job).await?;

        info!("Job created: {} by recruiter {}", saved.id, saved.recruiter_id);
        self.invalidation.after_write(AFFECTED).await;
        Ok(saved)
    }

    async fn update_job(&self, caller: UserId, id: JobId, request: UpdateJobRequest) -> HireloopResult<Job> {
        debug!("Updating job: {}", id);

        request.validate_request()?;

        let mut job = self.owned_job(caller, id).await?;
        let UpdateJobRequest {
            title,
            company,
            location,
            job_type,
            experience_level,
            salary,
            description,
            application_url,
        } = request;

        if let Some(title) = title {
            job.title = title;
        }
        if let Some(company) = company {
            job.company = company;
        }
        if let Some(location) = location {
            job.location = location;
        }
        if let Some(job_type) = job_type {
            job.job_type = job_type;
        }
        if let Some(experience_level) = experience_level {
            job.experience_level = experience_level;
        }
        if salary.is_some() {
            job.salary = salary;
        }
        if let Some(description) = description {
            job.description = description;
        }
        if application_url.is_some() {
            job.application_url = application_url;
        }

        let updated = self.job_repository.update(&job).await?;

        info!("Job updated: {}", id);
        self.invalidation.after_write(AFFECTED).await;
        Ok(updated)
    }

    async fn delete_job(&self, caller: UserId, id: JobId) -> HireloopResult<()> {
        debug!("Deleting job: {}", id);

        self.owned_job(caller, id).await?;

        if !self.job_repository.delete(id).await? {
            return Err(HireloopError::not_found("Job", id));
        }

        info!("Job deleted: {}", id);
        self.invalidation.after_write(AFFECTED).await;
        Ok(())
    }
}

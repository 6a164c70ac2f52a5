//! Job service trait definition.

use crate::cache::Cached;
use crate::dto::{CreateJobRequest, UpdateJobRequest};
use async_trait::async_trait;
use hireloop_core::{HireloopResult, Job, JobDetail, JobId, JobSummary, ListQuery, Page, UserId};

/// Job service trait.
#[async_trait]
pub trait JobService: Send + Sync {
    async fn list_jobs(&self, query: &ListQuery) -> HireloopResult<Page<JobSummary>>;

    async fn list_jobs_cached(&self, query: &ListQuery) -> HireloopResult<Cached<Page<JobSummary>>>;

    async fn invalidate_job_cache(&self) -> u64;

    /// Lists the postings of one recruiter. Any `recruiterId` filter in the
    /// query is replaced.
    async fn list_jobs_for_recruiter(&self, recruiter: UserId, query: &ListQuery) -> HireloopResult<Page<JobSummary>>;

    /// The job with its recruiter and applications.
    async fn get_job(&self, id: JobId) -> HireloopResult<JobDetail>;

    async fn create_job(&self, request: CreateJobRequest) -> HireloopResult<Job>;

    /// Updates a job. Only its recruiter may do so.
    async fn update_job(&self, caller: UserId, id: JobId, request: UpdateJobRequest) -> HireloopResult<Job>;

    /// Deletes a job and its applications. Only its recruiter may do so.
    async fn delete_job(&self, caller: UserId, id: JobId) -> HireloopResult<()>;
}

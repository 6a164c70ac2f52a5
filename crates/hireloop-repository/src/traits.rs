//! Repository trait definitions.

use async_trait::async_trait;
use hireloop_core::{
    Application, ApplicationId, ApplicationStatus, ApplicationSummary, HireloopResult, Job, JobDetail, JobId,
    JobSummary, ListQuery, Page, User, UserId, UserSummary,
};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// One filtered page, newest first.
    async fn list(&self, query: &ListQuery) -> HireloopResult<Page<UserSummary>>;

    async fn find_by_id(&self, id: UserId) -> HireloopResult<Option<User>>;

    /// Inserts a user. Duplicate emails surface as `Conflict`.
    async fn create(&self, user: &User) -> HireloopResult<User>;

    /// Writes every mutable column; `NotFound` if the row is gone.
    async fn update(&self, user: &User) -> HireloopResult<User>;

    /// Deletes a user, cascading to their jobs and applications.
    async fn delete(&self, id: UserId) -> HireloopResult<bool>;
}

/// Job repository trait.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> HireloopResult<Page<JobSummary>>;

    async fn find_by_id(&self, id: JobId) -> HireloopResult<Option<Job>>;

    /// The job with its recruiter and every application, newest first.
    async fn find_detail(&self, id: JobId) -> HireloopResult<Option<JobDetail>>;

    /// Inserts a job. An unknown recruiter surfaces as `InvalidReference`.
    async fn create(&self, job: &Job) -> HireloopResult<Job>;

    async fn update(&self, job: &Job) -> HireloopResult<Job>;

    async fn delete(&self, id: JobId) -> HireloopResult<bool>;
}

/// Application repository trait.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> HireloopResult<Page<ApplicationSummary>>;

    async fn find_by_id(&self, id: ApplicationId) -> HireloopResult<Option<Application>>;

    /// Inserts an application; a second one for the same job and candidate
    /// is a `Conflict`.
    async fn create(&self, application: &Application) -> HireloopResult<Application>;

    /// Returns the updated row, or `None` if it does not exist.
    async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> HireloopResult<Option<Application>>;

    async fn delete(&self, id: ApplicationId) -> HireloopResult<bool>;
}

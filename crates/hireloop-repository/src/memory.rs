//! In-memory repositories sharing one store.
//!
//! They mirror the PostgreSQL behaviour the upper layers rely on: unique
//! email and (job, candidate), foreign keys, cascading deletes, equality
//! filters compared as text, and newest-first ordering.

use crate::traits::{ApplicationRepository, JobRepository, UserRepository};
use async_trait::async_trait;
use hireloop_core::{
    Application, ApplicationId, ApplicationStatus, ApplicationSummary, HireloopError, HireloopResult, Job,
    JobApplicant, JobDetail, JobId, JobRef, JobSummary, ListQuery, Page, PersonRef, User, UserId, UserSummary,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    jobs: HashMap<JobId, Job>,
    applications: HashMap<ApplicationId, Application>,
}

/// Shared backing store; hand out repositories with the `*_repository` methods.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    list_reads: AtomicUsize,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of `list` calls served, across all entities.
    #[must_use]
    pub fn list_reads(&self) -> usize {
        self.list_reads.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn user_repository(self: &Arc<Self>) -> Arc<dyn UserRepository> {
        Arc::new(InMemoryUserRepository(Arc::clone(self)))
    }

    #[must_use]
    pub fn job_repository(self: &Arc<Self>) -> Arc<dyn JobRepository> {
        Arc::new(InMemoryJobRepository(Arc::clone(self)))
    }

    #[must_use]
    pub fn application_repository(self: &Arc<Self>) -> Arc<dyn ApplicationRepository> {
        Arc::new(InMemoryApplicationRepository(Arc::clone(self)))
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock()
    }

    fn record_list(&self) {
        self.list_reads.fetch_add(1, Ordering::SeqCst);
    }
}

fn person(user: &User) -> PersonRef {
    PersonRef {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

/// Equality on every filter, using the same field names as the SQL allowlists.
fn filter_matches(query: &ListQuery, value_of: impl Fn(&str) -> Option<String>) -> bool {
    query
        .filters
        .iter()
        .all(|(field, expected)| value_of(field).is_some_and(|actual| actual == expected))
}

fn paginate<T>(mut rows: Vec<T>, query: &ListQuery) -> Page<T> {
    let total = rows.len() as u64;
    let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
    let items = if offset < rows.len() {
        rows.drain(offset..).take(limit).collect()
    } else {
        Vec::new()
    };
    Page::new(items, query.page, total)
}

struct InMemoryUserRepository(Arc<InMemoryStore>);

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self, query: &ListQuery) -> HireloopResult<Page<UserSummary>> {
        self.0.record_list();
        let tables = self.0.lock();
        let mut users: Vec<&User> = tables
            .users
            .values()
            .filter(|u| {
                filter_matches(query, |field| match field {
                    "role" => Some(u.role.as_str().to_string()),
                    _ => None,
                })
            })
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let rows = users
            .into_iter()
            .map(|u| UserSummary {
                id: u.id,
                email: u.email.clone(),
                name: u.name.clone(),
                role: u.role,
                created_at: u.created_at,
                job_count: tables.jobs.values().filter(|j| j.recruiter_id == u.id).count() as u64,
                application_count: tables
                    .applications
                    .values()
                    .filter(|a| a.candidate_id == u.id)
                    .count() as u64,
            })
            .collect();
        Ok(paginate(rows, query))
    }

    async fn find_by_id(&self, id: UserId) -> HireloopResult<Option<User>> {
        Ok(self.0.lock().users.get(&id).cloned())
    }

    async fn create(&self, user: &User) -> HireloopResult<User> {
        let mut tables = self.0.lock();
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(HireloopError::conflict("duplicate value violates users_email_key"));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> HireloopResult<User> {
        let mut tables = self.0.lock();
        if !tables.users.contains_key(&user.id) {
            return Err(HireloopError::not_found("User", user.id));
        }
        if tables.users.values().any(|u| u.id != user.id && u.email == user.email) {
            return Err(HireloopError::conflict("duplicate value violates users_email_key"));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> HireloopResult<bool> {
        let mut tables = self.0.lock();
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        let owned_jobs: Vec<JobId> = tables
            .jobs
            .values()
            .filter(|j| j.recruiter_id == id)
            .map(|j| j.id)
            .collect();
        tables.jobs.retain(|_, j| j.recruiter_id != id);
        tables
            .applications
            .retain(|_, a| a.candidate_id != id && !owned_jobs.contains(&a.job_id));
        Ok(true)
    }
}

struct InMemoryJobRepository(Arc<InMemoryStore>);

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn list(&self, query: &ListQuery) -> HireloopResult<Page<JobSummary>> {
        self.0.record_list();
        let tables = self.0.lock();
        let mut jobs: Vec<&Job> = tables
            .jobs
            .values()
            .filter(|j| {
                filter_matches(query, |field| match field {
                    "jobType" => Some(j.job_type.as_str().to_string()),
                    "experienceLevel" => Some(j.experience_level.as_str().to_string()),
                    "recruiterId" => Some(j.recruiter_id.to_string()),
                    _ => None,
                })
            })
            .collect();
        jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at).then(b.id.cmp(&a.id)));

        let rows = jobs
            .into_iter()
            .filter_map(|j| {
                let recruiter = tables.users.get(&j.recruiter_id)?;
                Some(JobSummary {
                    id: j.id,
                    title: j.title.clone(),
                    company: j.company.clone(),
                    location: j.location.clone(),
                    job_type: j.job_type,
                    experience_level: j.experience_level,
                    salary: j.salary.clone(),
                    description: j.description.clone(),
                    application_url: j.application_url.clone(),
                    posted_at: j.posted_at,
                    recruiter: person(recruiter),
                    application_count: tables.applications.values().filter(|a| a.job_id == j.id).count()
                        as u64,
                })
            })
            .collect();
        Ok(paginate(rows, query))
    }

    async fn find_by_id(&self, id: JobId) -> HireloopResult<Option<Job>> {
        Ok(self.0.lock().jobs.get(&id).cloned())
    }

    async fn find_detail(&self, id: JobId) -> HireloopResult<Option<JobDetail>> {
        let tables = self.0.lock();
        let Some(job) = tables.jobs.get(&id) else {
            return Ok(None);
        };
        let recruiter = tables
            .users
            .get(&job.recruiter_id)
            .map(person)
            .ok_or_else(|| HireloopError::not_found("User", job.recruiter_id))?;

        let mut applications: Vec<JobApplicant> = tables
            .applications
            .values()
            .filter(|a| a.job_id == id)
            .filter_map(|a| {
                let candidate = tables.users.get(&a.candidate_id)?;
                Some(JobApplicant {
                    id: a.id,
                    status: a.status,
                    applied_at: a.applied_at,
                    candidate: person(candidate),
                })
            })
            .collect();
        applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));

        Ok(Some(JobDetail {
            job: job.clone(),
            recruiter,
            applications,
        }))
    }

    async fn create(&self, job: &Job) -> HireloopResult<Job> {
        let mut tables = self.0.lock();
        if !tables.users.contains_key(&job.recruiter_id) {
            return Err(HireloopError::InvalidReference("jobs_recruiter_id_fkey".to_string()));
        }
        tables.jobs.insert(job.id, job.clone());
        Ok(job.clone())
    }

    async fn update(&self, job: &Job) -> HireloopResult<Job> {
        let mut tables = self.0.lock();
        let Some(existing) = tables.jobs.get_mut(&job.id) else {
            return Err(HireloopError::not_found("Job", job.id));
        };
        // recruiter and posting time are not updatable
        let recruiter_id = existing.recruiter_id;
        let posted_at = existing.posted_at;
        *existing = Job {
            recruiter_id,
            posted_at,
            ..job.clone()
        };
        Ok(existing.clone())
    }

    async fn delete(&self, id: JobId) -> HireloopResult<bool> {
        let mut tables = self.0.lock();
        if tables.jobs.remove(&id).is_none() {
            return Ok(false);
        }
        tables.applications.retain(|_, a| a.job_id != id);
        Ok(true)
    }
}

struct InMemoryApplicationRepository(Arc<InMemoryStore>);

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn list(&self, query: &ListQuery) -> HireloopResult<Page<ApplicationSummary>> {
        self.0.record_list();
        let tables = self.0.lock();
        let mut applications: Vec<&Application> = tables
            .applications
            .values()
            .filter(|a| {
                filter_matches(query, |field| match field {
                    "status" => Some(a.status.as_str().to_string()),
                    "jobId" => Some(a.job_id.to_string()),
                    "candidateId" => Some(a.candidate_id.to_string()),
                    _ => None,
                })
            })
            .collect();
        applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at).then(b.id.cmp(&a.id)));

        let rows = applications
            .into_iter()
            .filter_map(|a| {
                let job = tables.jobs.get(&a.job_id)?;
                let candidate = tables.users.get(&a.candidate_id)?;
                Some(ApplicationSummary {
                    id: a.id,
                    status: a.status,
                    applied_at: a.applied_at,
                    job: JobRef {
                        id: job.id,
                        title: job.title.clone(),
                        company: job.company.clone(),
                        location: job.location.clone(),
                        job_type: job.job_type,
                        experience_level: job.experience_level,
                    },
                    candidate: person(candidate),
                })
            })
            .collect();
        Ok(paginate(rows, query))
    }

    async fn find_by_id(&self, id: ApplicationId) -> HireloopResult<Option<Application>> {
        Ok(self.0.lock().applications.get(&id).cloned())
    }

    async fn create(&self, application: &Application) -> HireloopResult<Application> {
        let mut tables = self.0.lock();
        if !tables.jobs.contains_key(&application.job_id) {
            return Err(HireloopError::InvalidReference("applications_job_id_fkey".to_string()));
        }
        if !tables.users.contains_key(&application.candidate_id) {
            return Err(HireloopError::InvalidReference(
                "applications_candidate_id_fkey".to_string(),
            ));
        }
        if tables
            .applications
            .values()
            .any(|a| a.job_id == application.job_id && a.candidate_id == application.candidate_id)
        {
            return Err(HireloopError::conflict(
                "duplicate value violates applications_job_id_candidate_id_key",
            ));
        }
        tables.applications.insert(application.id, application.clone());
        Ok(application.clone())
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> HireloopResult<Option<Application>> {
        let mut tables = self.0.lock();
        Ok(tables.applications.get_mut(&id).map(|a| {
            a.status = status;
            a.clone()
        }))
    }

    async fn delete(&self, id: ApplicationId) -> HireloopResult<bool> {
        Ok(self.0.lock().applications.remove(&id).is_some())
    }
}

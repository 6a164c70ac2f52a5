//! PostgreSQL job repository implementation.

use super::parse_column;
use crate::list_query::{to_u64, ListSpec};
use crate::{traits::JobRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hireloop_core::{
    ApplicationId, HireloopError, HireloopResult, Job, JobApplicant, JobDetail, JobId, JobSummary, ListQuery,
    Page, PersonRef, UserId,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const JOB_COLUMNS: &str = "j.id, j.title, j.company, j.location, j.job_type, j.experience_level, \
                           j.salary, j.description, j.application_url, j.recruiter_id, j.posted_at";

const LIST: ListSpec = ListSpec {
    select: "j.id, j.title, j.company, j.location, j.job_type, j.experience_level, \
             j.salary, j.description, j.application_url, j.posted_at, \
             r.id AS recruiter_id, r.name AS recruiter_name, r.email AS recruiter_email, \
             (SELECT COUNT(*) FROM applications a WHERE a.job_id = j.id) AS application_count",
    from: "jobs j JOIN users r ON r.id = j.recruiter_id",
    order_by: "j.posted_at DESC, j.id DESC",
    filters: &[
        ("jobType", "j.job_type"),
        ("experienceLevel", "j.experience_level"),
        ("recruiterId", "j.recruiter_id::text"),
    ],
};

/// PostgreSQL job repository implementation.
#[derive(Clone)]
pub struct PgJobRepository {
    pool: Arc<DatabasePool>,
}

impl PgJobRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a job.
#[derive(Debug, FromRow)]
struct JobRow {
    id: Uuid,
    title: String,
    company: String,
    location: String,
    job_type: String,
    experience_level: String,
    salary: Option<String>,
    description: String,
    application_url: Option<String>,
    recruiter_id: Uuid,
    posted_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = HireloopError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: JobId::from_uuid(row.id),
            title: row.title,
            company: row.company,
            location: row.location,
            job_type: parse_column(&row.job_type, "job_type")?,
            experience_level: parse_column(&row.experience_level, "experience_level")?,
            salary: row.salary,
            description: row.description,
            application_url: row.application_url,
            recruiter_id: UserId::from_uuid(row.recruiter_id),
            posted_at: row.posted_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct JobSummaryRow {
    id: Uuid,
    title: String,
    company: String,
    location: String,
    job_type: String,
    experience_level: String,
    salary: Option<String>,
    description: String,
    application_url: Option<String>,
    posted_at: DateTime<Utc>,
    recruiter_id: Uuid,
    recruiter_name: Option<String>,
    recruiter_email: String,
    application_count: i64,
}

impl TryFrom<JobSummaryRow> for JobSummary {
    type Error = HireloopError;

    fn try_from(row: JobSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: JobId::from_uuid(row.id),
            title: row.title,
            company: row.company,
            location: row.location,
            job_type: parse_column(&row.job_type, "job_type")?,
            experience_level: parse_column(&row.experience_level, "experience_level")?,
            salary: row.salary,
            description: row.description,
            application_url: row.application_url,
            posted_at: row.posted_at,
            recruiter: PersonRef {
                id: UserId::from_uuid(row.recruiter_id),
                name: row.recruiter_name,
                email: row.recruiter_email,
            },
            application_count: to_u64(row.application_count),
        })
    }
}

#[derive(Debug, FromRow)]
struct ApplicantRow {
    id: Uuid,
    status: String,
    applied_at: DateTime<Utc>,
    candidate_id: Uuid,
    candidate_name: Option<String>,
    candidate_email: String,
}

impl TryFrom<ApplicantRow> for JobApplicant {
    type Error = HireloopError;

    fn try_from(row: ApplicantRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ApplicationId::from_uuid(row.id),
            status: parse_column(&row.status, "status")?,
            applied_at: row.applied_at,
            candidate: PersonRef {
                id: UserId::from_uuid(row.candidate_id),
                name: row.candidate_name,
                email: row.candidate_email,
            },
        })
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn list(&self, query: &ListQuery) -> HireloopResult<Page<JobSummary>> {
        debug!(
            "Listing jobs, page: {}, limit: {}, filters: {}",
            query.page.page,
            query.page.limit,
            query.filters.canonical()
        );

        let total: i64 = LIST
            .count_query(&query.filters)
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.inner())
            .await?;

        let rows: Vec<JobSummaryRow> = LIST
            .fetch_query(query)
            .build_query_as::<JobSummaryRow>()
            .fetch_all(self.pool.inner())
            .await?;

        let items = rows
            .into_iter()
            .map(JobSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, query.page, to_u64(total)))
    }

    async fn find_by_id(&self, id: JobId) -> HireloopResult<Option<Job>> {
        debug!("Finding job by id: {}", id);

        let row = sqlx::query_as::<_, JobRow>(&format!("SELECT {JOB_COLUMNS} FROM jobs j WHERE j.id = $1"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Job::try_from).transpose()
    }

    async fn find_detail(&self, id: JobId) -> HireloopResult<Option<JobDetail>> {
        debug!("Loading job detail: {}", id);

        let Some(job) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let recruiter = sqlx::query_as::<_, (Uuid, Option<String>, String)>(
            "SELECT id, name, email FROM users WHERE id = $1",
        )
        .bind(job.recruiter_id.into_inner())
        .fetch_one(self.pool.inner())
        .await
        .map(|(id, name, email)| PersonRef {
            id: UserId::from_uuid(id),
            name,
            email,
        })?;

        let applications = sqlx::query_as::<_, ApplicantRow>(
            r"
            SELECT a.id, a.status, a.applied_at,
                   c.id AS candidate_id, c.name AS candidate_name, c.email AS candidate_email
            FROM applications a
            JOIN users c ON c.id = a.candidate_id
            WHERE a.job_id = $1
            ORDER BY a.applied_at DESC
            ",
        )
        .bind(id.into_inner())
        .fetch_all(self.pool.inner())
        .await?
        .into_iter()
        .map(JobApplicant::try_from)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(JobDetail {
            job,
            recruiter,
            applications,
        }))
    }

    async fn create(&self, job: &Job) -> HireloopResult<Job> {
        debug!("Creating job '{}' for recruiter {}", job.title, job.recruiter_id);

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r"
            INSERT INTO jobs AS j (id, title, company, location, job_type, experience_level,
                                   salary, description, application_url, recruiter_id, posted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {JOB_COLUMNS}
            "
        ))
        .bind(job.id.into_inner())
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.job_type.as_str())
        .bind(job.experience_level.as_str())
        .bind(&job.salary)
        .bind(&job.description)
        .bind(&job.application_url)
        .bind(job.recruiter_id.into_inner())
        .bind(job.posted_at)
        .fetch_one(self.pool.inner())
        .await?;

        Job::try_from(row)
    }

    async fn update(&self, job: &Job) -> HireloopResult<Job> {
        debug!("Updating job: {}", job.id);

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r"
            UPDATE jobs AS j
            SET title = $2, company = $3, location = $4, job_type = $5, experience_level = $6,
                salary = $7, description = $8, application_url = $9
            WHERE j.id = $1
            RETURNING {JOB_COLUMNS}
            "
        ))
        .bind(job.id.into_inner())
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.job_type.as_str())
        .bind(job.experience_level.as_str())
        .bind(&job.salary)
        .bind(&job.description)
        .bind(&job.application_url)
        .fetch_optional(self.pool.inner())
        .await?
        .ok_or_else(|| HireloopError::not_found("Job", job.id))?;

        Job::try_from(row)
    }

    async fn delete(&self, id: JobId) -> HireloopResult<bool> {
        debug!("Deleting job: {}", id);

        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

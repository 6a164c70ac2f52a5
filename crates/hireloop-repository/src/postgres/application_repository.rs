//! PostgreSQL application repository implementation.

use super::parse_column;
use crate::list_query::{to_u64, ListSpec};
use crate::{traits::ApplicationRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hireloop_core::{
    Application, ApplicationId, ApplicationStatus, ApplicationSummary, HireloopError, HireloopResult, JobId,
    JobRef, ListQuery, Page, PersonRef, UserId,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const LIST: ListSpec = ListSpec {
    select: "a.id, a.status, a.applied_at, \
             j.id AS job_id, j.title AS job_title, j.company AS job_company, j.location AS job_location, \
             j.job_type AS job_type, j.experience_level AS job_experience_level, \
             c.id AS candidate_id, c.name AS candidate_name, c.email AS candidate_email",
    from: "applications a JOIN jobs j ON j.id = a.job_id JOIN users c ON c.id = a.candidate_id",
    order_by: "a.applied_at DESC, a.id DESC",
    filters: &[
        ("status", "a.status"),
        ("jobId", "a.job_id::text"),
        ("candidateId", "a.candidate_id::text"),
    ],
};

/// PostgreSQL application repository implementation.
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: Arc<DatabasePool>,
}

impl PgApplicationRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: Uuid,
    job_id: Uuid,
    candidate_id: Uuid,
    status: String,
    applied_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = HireloopError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ApplicationId::from_uuid(row.id),
            job_id: JobId::from_uuid(row.job_id),
            candidate_id: UserId::from_uuid(row.candidate_id),
            status: parse_column(&row.status, "status")?,
            applied_at: row.applied_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ApplicationSummaryRow {
    id: Uuid,
    status: String,
    applied_at: DateTime<Utc>,
    job_id: Uuid,
    job_title: String,
    job_company: String,
    job_location: String,
    job_type: String,
    job_experience_level: String,
    candidate_id: Uuid,
    candidate_name: Option<String>,
    candidate_email: String,
}

impl TryFrom<ApplicationSummaryRow> for ApplicationSummary {
    type Error = HireloopError;

    fn try_from(row: ApplicationSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ApplicationId::from_uuid(row.id),
            status: parse_column(&row.status, "status")?,
            applied_at: row.applied_at,
            job: JobRef {
                id: JobId::from_uuid(row.job_id),
                title: row.job_title,
                company: row.job_company,
                location: row.job_location,
                job_type: parse_column(&row.job_type, "job_type")?,
                experience_level: parse_column(&row.job_experience_level, "experience_level")?,
            },
            candidate: PersonRef {
                id: UserId::from_uuid(row.candidate_id),
                name: row.candidate_name,
                email: row.candidate_email,
            },
        })
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn list(&self, query: &ListQuery) -> HireloopResult<Page<ApplicationSummary>> {
        debug!(
            "Listing applications, page: {}, limit: {}, filters: {}",
            query.page.page,
            query.page.limit,
            query.filters.canonical()
        );

        let total: i64 = LIST
            .count_query(&query.filters)
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.inner())
            .await?;

        let rows: Vec<ApplicationSummaryRow> = LIST
            .fetch_query(query)
            .build_query_as::<ApplicationSummaryRow>()
            .fetch_all(self.pool.inner())
            .await?;

        let items = rows
            .into_iter()
            .map(ApplicationSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, query.page, to_u64(total)))
    }

    async fn find_by_id(&self, id: ApplicationId) -> HireloopResult<Option<Application>> {
        debug!("Finding application by id: {}", id);

        let row = sqlx::query_as::<_, ApplicationRow>(
            "SELECT id, job_id, candidate_id, status, applied_at FROM applications WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Application::try_from).transpose()
    }

    async fn create(&self, application: &Application) -> HireloopResult<Application> {
        debug!(
            "Creating application of {} to job {}",
            application.candidate_id, application.job_id
        );

        let row = sqlx::query_as::<_, ApplicationRow>(
            r"
            INSERT INTO applications (id, job_id, candidate_id, status, applied_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, job_id, candidate_id, status, applied_at
            ",
        )
        .bind(application.id.into_inner())
        .bind(application.job_id.into_inner())
        .bind(application.candidate_id.into_inner())
        .bind(application.status.as_str())
        .bind(application.applied_at)
        .fetch_one(self.pool.inner())
        .await?;

        Application::try_from(row)
    }

    async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> HireloopResult<Option<Application>> {
        debug!("Setting application {} to {}", id, status);

        let row = sqlx::query_as::<_, ApplicationRow>(
            r"
            UPDATE applications SET status = $2
            WHERE id = $1
            RETURNING id, job_id, candidate_id, status, applied_at
            ",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Application::try_from).transpose()
    }

    async fn delete(&self, id: ApplicationId) -> HireloopResult<bool> {
        debug!("Deleting application: {}", id);

        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

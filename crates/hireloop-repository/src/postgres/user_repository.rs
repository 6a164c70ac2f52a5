//! PostgreSQL user repository implementation.

use super::parse_column;
use crate::list_query::{to_u64, ListSpec};
use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hireloop_core::{HireloopError, HireloopResult, ListQuery, Page, User, UserId, UserSummary};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const LIST: ListSpec = ListSpec {
    select: "u.id, u.email, u.name, u.role, u.created_at, \
             (SELECT COUNT(*) FROM jobs j WHERE j.recruiter_id = u.id) AS job_count, \
             (SELECT COUNT(*) FROM applications a WHERE a.candidate_id = u.id) AS application_count",
    from: "users u",
    order_by: "u.created_at DESC, u.id DESC",
    filters: &[("role", "u.role")],
};

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Arc<DatabasePool>,
}

impl PgUserRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = HireloopError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            email: row.email,
            name: row.name,
            role: parse_column(&row.role, "role")?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct UserSummaryRow {
    id: Uuid,
    email: String,
    name: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    job_count: i64,
    application_count: i64,
}

impl TryFrom<UserSummaryRow> for UserSummary {
    type Error = HireloopError;

    fn try_from(row: UserSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from_uuid(row.id),
            email: row.email,
            name: row.name,
            role: parse_column(&row.role, "role")?,
            created_at: row.created_at,
            job_count: to_u64(row.job_count),
            application_count: to_u64(row.application_count),
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self, query: &ListQuery) -> HireloopResult<Page<UserSummary>> {
        debug!(
            "Listing users, page: {}, limit: {}, filters: {}",
            query.page.page,
            query.page.limit,
            query.filters.canonical()
        );

        let total: i64 = LIST
            .count_query(&query.filters)
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.inner())
            .await?;

        let rows: Vec<UserSummaryRow> = LIST
            .fetch_query(query)
            .build_query_as::<UserSummaryRow>()
            .fetch_all(self.pool.inner())
            .await?;

        let items = rows
            .into_iter()
            .map(UserSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, query.page, to_u64(total)))
    }

    async fn find_by_id(&self, id: UserId) -> HireloopResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, name, role, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, user: &User) -> HireloopResult<User> {
        debug!("Creating user: {}", user.email);

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (id, email, name, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, name, role, created_at, updated_at
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        User::try_from(row)
    }

    async fn update(&self, user: &User) -> HireloopResult<User> {
        debug!("Updating user: {}", user.id);

        let row = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE users
            SET email = $2, name = $3, role = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, email, name, role, created_at, updated_at
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(user.updated_at)
        .fetch_optional(self.pool.inner())
        .await?
        .ok_or_else(|| HireloopError::not_found("User", user.id))?;

        User::try_from(row)
    }

    async fn delete(&self, id: UserId) -> HireloopResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! Shared COUNT + paged SELECT construction for list endpoints.

use hireloop_core::{FilterSet, ListQuery};
use sqlx::{Postgres, QueryBuilder};
use tracing::debug;

/// Static description of one entity's list query.
///
/// `filters` is the allowlist: a filter name the client may send, paired
/// with the SQL expression it is compared against. Names not in the list
/// never reach SQL.
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    /// Projection, without the `SELECT` keyword.
    pub select: &'static str,
    /// `FROM` clause body, including joins.
    pub from: &'static str,
    /// `ORDER BY` body; newest first.
    pub order_by: &'static str,
    pub filters: &'static [(&'static str, &'static str)],
}

impl ListSpec {
    fn column(&self, field: &str) -> Option<&'static str> {
        self.filters
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
    }

    fn push_where(&self, builder: &mut QueryBuilder<'static, Postgres>, filters: &FilterSet) {
        let mut first = true;
        for (field, value) in filters.iter() {
            let Some(column) = self.column(field) else {
                debug!("Ignoring unrecognized filter: {}", field);
                continue;
            };
            builder.push(if first { " WHERE " } else { " AND " });
            builder.push(column);
            builder.push(" = ");
            builder.push_bind(value.to_string());
            first = false;
        }
    }

    /// `SELECT COUNT(*)` over the filtered rows.
    #[must_use]
    pub fn count_query(&self, filters: &FilterSet) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM ");
        builder.push(self.from);
        self.push_where(&mut builder, filters);
        builder
    }

    /// Ordered, bounded fetch of one page.
    #[must_use]
    pub fn fetch_query(&self, query: &ListQuery) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(self.select);
        builder.push(" FROM ");
        builder.push(self.from);
        self.push_where(&mut builder, &query.filters);
        builder.push(" ORDER BY ");
        builder.push(self.order_by);
        builder.push(" LIMIT ");
        builder.push_bind(to_i64(query.page.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(to_i64(query.page.offset()));
        builder
    }
}

/// Postgres has no unsigned integers; saturate instead of wrapping.
pub(crate) fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// `COUNT(*)` comes back as `BIGINT`, never negative.
pub(crate) fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

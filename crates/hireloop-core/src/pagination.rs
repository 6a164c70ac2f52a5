//! Pagination types for list operations.
//!
//! Raw `page`/`limit` query strings are resolved into a [`PageRequest`]
//! that is always within bounds; resolution never fails.

use serde::{Deserialize, Serialize};

/// Bounds applied when resolving page requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    /// Limit used when the client sends none, garbage, or a value below 1.
    pub default_limit: u64,
    /// Largest limit a client may request.
    pub max_limit: u64,
}

impl PageLimits {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: Self::DEFAULT_LIMIT,
            max_limit: Self::MAX_LIMIT,
        }
    }
}

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: u64,
    /// The number of items per page.
    pub limit: u64,
}

impl PageRequest {
    /// Creates a page request under the default [`PageLimits`].
    ///
    /// Request handling goes through [`PageRequest::resolve`] or
    /// [`PageRequest::within`] with the configured bounds instead.
    #[must_use]
    pub fn new(page: u64, limit: u64) -> Self {
        Self::within(page, limit, PageLimits::default())
    }

    /// Creates a page request, clamping `page` to at least 1 and `limit`
    /// into `1..=limits.max_limit`.
    #[must_use]
    pub fn within(page: u64, limit: u64, limits: PageLimits) -> Self {
        Self {
            page: page.max(1),
            limit: limit.min(limits.max_limit).max(1),
        }
    }

    /// Resolves raw query values into a bounded page request.
    ///
    /// - missing or non-integer `page`, or `page < 1`, becomes 1
    /// - missing or non-integer `limit`, or `limit < 1`, becomes the default
    /// - `limit` above the maximum becomes the maximum
    #[must_use]
    pub fn resolve(page: Option<&str>, limit: Option<&str>, limits: PageLimits) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit).unwrap_or(limits.default_limit);

        Self::within(page, limit, limits)
    }

    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: PageLimits::DEFAULT_LIMIT,
        }
    }
}

/// Parses a query value as a strictly positive integer.
fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .and_then(|n| u64::try_from(n).ok())
}

/// Pagination block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The current page number (1-indexed).
    pub page: u64,
    /// The number of items per page.
    pub limit: u64,
    /// Number of rows matching the filters, across all pages.
    pub total: u64,
    /// `ceil(total / limit)`; zero when nothing matches.
    pub total_pages: u64,
}

impl PageInfo {
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages: total.div_ceil(request.limit),
        }
    }
}

/// A page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Page<T> {
    /// The items on this page, newest first.
    pub items: Vec<T>,
    /// Information about this page.
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            pagination: PageInfo::new(request, total),
        }
    }

    /// Creates an empty page.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the total number of matching rows.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.pagination.total
    }

    /// Returns the total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.pagination.total_pages
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

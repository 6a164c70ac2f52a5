//! Cache key generators for consistent key naming.

use hireloop_core::ListQuery;

/// Prefix for all cache keys to namespace them.
pub const CACHE_PREFIX: &str = "hireloop:cache";

/// Endpoint names used in list cache keys.
pub mod endpoints {
    pub const USERS: &str = "users";
    pub const JOBS: &str = "jobs";
}

/// Key of one cached list page.
///
/// Filters are rendered in sorted order, so two requests that differ only
/// in query parameter order share a key.
#[must_use]
pub fn list_key(endpoint: &str, query: &ListQuery) -> String {
    format!(
        "{}:{}:list:{}:page:{}:limit:{}",
        CACHE_PREFIX,
        endpoint,
        query.filters.canonical(),
        query.page.page,
        query.page.limit
    )
}

/// Pattern matching every cached list page of an endpoint.
#[must_use]
pub fn list_pattern(endpoint: &str) -> String {
    format!("{CACHE_PREFIX}:{endpoint}:list:*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hireloop_core::{FilterSet, PageRequest};

    #[test]
    fn test_list_key_without_filters() {
        let query = ListQuery::new(PageRequest::new(1, 10), FilterSet::new());
        assert_eq!(list_key(endpoints::USERS, &query), "hireloop:cache:users:list:all:page:1:limit:10");
    }

    #[test]
    fn test_list_key_ignores_filter_order() {
        let a = FilterSet::new().with("jobType", "CONTRACT").with("experienceLevel", "SENIOR");
        let b = FilterSet::new().with("experienceLevel", "SENIOR").with("jobType", "CONTRACT");
        let page = PageRequest::new(2, 20);

        let key = list_key(endpoints::JOBS, &ListQuery::new(page, a));
        assert_eq!(key, list_key(endpoints::JOBS, &ListQuery::new(page, b)));
        assert_eq!(
            key,
            "hireloop:cache:jobs:list:experienceLevel=SENIOR&jobType=CONTRACT:page:2:limit:20"
        );
    }

    #[test]
    fn test_list_key_keeps_filter_values_apart() {
        let page = PageRequest::new(1, 10);
        let smuggled = ListQuery::new(page, FilterSet::new().with("jobType", "FULL_TIME&recruiterId=r1"));
        let genuine = ListQuery::new(page, FilterSet::new().with("jobType", "FULL_TIME").with("recruiterId", "r1"));
        assert_ne!(list_key(endpoints::JOBS, &smuggled), list_key(endpoints::JOBS, &genuine));

        let spoofed_page = ListQuery::new(page, FilterSet::new().with("role", "ADMIN:page:9:limit:99"));
        let key = list_key(endpoints::USERS, &spoofed_page);
        assert!(key.ends_with(":page:1:limit:10"));
        assert_eq!(key.matches(":page:").count(), 1);
    }

    #[test]
    fn test_list_key_differs_by_page() {
        let first = ListQuery::new(PageRequest::new(1, 10), FilterSet::new());
        let second = ListQuery::new(PageRequest::new(2, 10), FilterSet::new());
        assert_ne!(list_key(endpoints::USERS, &first), list_key(endpoints::USERS, &second));
    }

    #[test]
    fn test_list_pattern() {
        assert_eq!(list_pattern(endpoints::JOBS), "hireloop:cache:jobs:list:*");
        assert!(list_key(endpoints::JOBS, &ListQuery::default()).starts_with("hireloop:cache:jobs:list:"));
    }
}

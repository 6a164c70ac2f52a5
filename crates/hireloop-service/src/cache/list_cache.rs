//! Cache-aside read path for list endpoints.

use super::{cache_keys, CacheExt, CacheInterface};
use hireloop_core::{HireloopResult, ListQuery, Page};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// A value and whether it came from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub cached: bool,
}

impl<T> Cached<T> {
    #[must_use]
    pub const fn hit(value: T) -> Self {
        Self { value, cached: true }
    }

    #[must_use]
    pub const fn miss(value: T) -> Self {
        Self { value, cached: false }
    }
}

/// Cache-aside wrapper around list loaders.
///
/// Cache failures never fail a request: they are logged and the loader
/// runs as on a miss. Loader errors propagate unchanged and are not cached.
#[derive(Clone)]
pub struct ListCache {
    cache: Arc<dyn CacheInterface>,
    ttl: Duration,
}

impl ListCache {
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached page for `query`, or runs `loader` and caches its
    /// result for the configured TTL.
    pub async fn get_or_load<T, F, Fut>(
        &self,
        endpoint: &str,
        query: &ListQuery,
        loader: F,
    ) -> HireloopResult<Cached<Page<T>>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = HireloopResult<Page<T>>> + Send,
    {
        let key = cache_keys::list_key(endpoint, query);

        match self.cache.get::<Page<T>>(&key).await {
            Ok(Some(page)) => {
                debug!("List cache hit: {}", key);
                return Ok(Cached::hit(page));
            }
            Ok(None) => debug!("List cache miss: {}", key),
            Err(e) => warn!("List cache read failed for '{}', loading from store: {}", key, e),
        }

        let page = loader().await?;

        if let Err(e) = self.cache.set(&key, &page, self.ttl).await {
            warn!("List cache write failed for '{}': {}", key, e);
        }

        Ok(Cached::miss(page))
    }

    /// Drops every cached page of `endpoint` and returns how many were
    /// removed. Failures are logged and reported as zero.
    pub async fn invalidate(&self, endpoint: &str) -> u64 {
        let pattern = cache_keys::list_pattern(endpoint);
        match self.cache.delete_pattern(&pattern).await {
            Ok(deleted) => {
                debug!("Invalidated {} cached pages for '{}'", deleted, endpoint);
                deleted
            }
            Err(e) => {
                warn!("List cache invalidation failed for '{}': {}", endpoint, e);
                0
            }
        }
    }
}

impl std::fmt::Debug for ListCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use hireloop_core::{FilterSet, HireloopError, PageRequest};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn query() -> ListQuery {
        ListQuery::new(PageRequest::new(1, 10), FilterSet::new().with("role", "RECRUITER"))
    }

    fn page(items: Vec<u32>) -> Page<u32> {
        let total = items.len() as u64;
        Page::new(items, PageRequest::new(1, 10), total)
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache = InMemoryCache::new();
        let list_cache = ListCache::new(cache, Duration::from_secs(60));
        let loads = AtomicUsize::new(0);

        for expected_cached in [false, true] {
            let result = list_cache
                .get_or_load("users", &query(), || async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(page(vec![1, 2, 3]))
                })
                .await
                .unwrap();
            assert_eq!(result.cached, expected_cached);
            assert_eq!(result.value, page(vec![1, 2, 3]));
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failing_cache_falls_back_to_loader() {
        let cache = InMemoryCache::new();
        cache.set_failing(true);
        let list_cache = ListCache::new(cache.clone(), Duration::from_secs(60));

        let result = list_cache
            .get_or_load("users", &query(), || async { Ok(page(vec![7])) })
            .await
            .unwrap();

        assert!(!result.cached);
        assert_eq!(result.value.items, vec![7]);
        assert_eq!(list_cache.invalidate("users").await, 0);
    }

    #[tokio::test]
    async fn test_loader_error_propagates_and_is_not_cached() {
        let cache = InMemoryCache::new();
        let list_cache = ListCache::new(cache.clone(), Duration::from_secs(60));

        let result = list_cache
            .get_or_load::<u32, _, _>("users", &query(), || async {
                Err(HireloopError::Database("connection refused".into()))
            })
            .await;

        assert!(matches!(result, Err(HireloopError::Database(_))));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_treated_as_miss() {
        let cache = InMemoryCache::new();
        let key = cache_keys::list_key("users", &query());
        cache.set_raw(&key, "not json", Duration::from_secs(60)).await.unwrap();
        let list_cache = ListCache::new(cache, Duration::from_secs(60));

        let result = list_cache
            .get_or_load("users", &query(), || async { Ok(page(vec![1])) })
            .await
            .unwrap();

        assert!(!result.cached);
    }

    #[tokio::test]
    async fn test_filter_value_cannot_alias_another_query() {
        let cache = InMemoryCache::new();
        let list_cache = ListCache::new(cache, Duration::from_secs(60));
        let page_request = PageRequest::new(1, 10);
        let smuggled = ListQuery::new(page_request, FilterSet::new().with("jobType", "FULL_TIME&recruiterId=r1"));
        let genuine = ListQuery::new(
            page_request,
            FilterSet::new().with("jobType", "FULL_TIME").with("recruiterId", "r1"),
        );

        list_cache
            .get_or_load("jobs", &smuggled, || async { Ok(page(vec![])) })
            .await
            .unwrap();
        let result = list_cache
            .get_or_load("jobs", &genuine, || async { Ok(page(vec![4, 5])) })
            .await
            .unwrap();

        assert!(!result.cached);
        assert_eq!(result.value.items, vec![4, 5]);
    }

    #[tokio::test]
    async fn test_invalidate_covers_filter_values_with_wildcards() {
        let cache = InMemoryCache::new();
        let list_cache = ListCache::new(cache.clone(), Duration::from_secs(60));

        for value in ["*", "a:b:page:2", "SENIOR*"] {
            let query = ListQuery::new(PageRequest::new(1, 10), FilterSet::new().with("experienceLevel", value));
            list_cache
                .get_or_load("jobs", &query, || async { Ok(page(vec![1])) })
                .await
                .unwrap();
        }

        assert_eq!(list_cache.invalidate("jobs").await, 3);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_drops_only_that_endpoint() {
        let cache = InMemoryCache::new();
        let list_cache = ListCache::new(cache.clone(), Duration::from_secs(60));

        for endpoint in ["users", "jobs"] {
            list_cache
                .get_or_load(endpoint, &query(), || async { Ok(page(vec![1])) })
                .await
                .unwrap();
        }

        assert_eq!(list_cache.invalidate("users").await, 1);
        assert_eq!(cache.len(), 1);

        let again = list_cache
            .get_or_load("users", &query(), || async { Ok(page(vec![2])) })
            .await
            .unwrap();
        assert!(!again.cached);
        assert_eq!(again.value.items, vec![2]);
    }
}

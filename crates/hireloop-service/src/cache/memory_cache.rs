//! In-process TTL cache built on Moka.
//!
//! Used when Redis is disabled and as the cache double in tests. Each entry
//! carries its own TTL and the cache is bounded by entry count, so expired
//! and least-useful entries are reclaimed without being touched again.

use super::CacheInterface;
use async_trait::async_trait;
use hireloop_core::{HealthCheck, HealthStatus, HireloopError, HireloopResult};
use moka::future::Cache;
use moka::Expiry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Upper bound on cached pages when no capacity is configured.
pub const DEFAULT_MAX_ENTRIES: u64 = 10_000;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, value: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Bounded cache backed by [`moka::future::Cache`].
pub struct InMemoryCache {
    entries: Cache<String, Entry>,
    failing: AtomicBool,
}

impl InMemoryCache {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Cache holding at most `max_entries` entries.
    #[must_use]
    pub fn with_capacity(max_entries: u64) -> Arc<Self> {
        debug!("Initializing in-memory cache (max {} entries)", max_entries);
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();

        Arc::new(Self {
            entries,
            failing: AtomicBool::new(false),
        })
    }

    /// Makes every subsequent call fail with a `Cache` error, simulating an
    /// unreachable server.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_available(&self) -> HireloopResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(HireloopError::Cache("in-memory cache is unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> HireloopResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.entries.get(key).await.map(|entry| entry.value))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> HireloopResult<()> {
        self.ensure_available()?;
        let entry = Entry {
            value: value.to_string(),
            ttl,
        };
        self.entries.insert(key.to_string(), entry).await;
        Ok(())
    }

    /// Supports exact keys and a single trailing `*`.
    async fn delete_pattern(&self, pattern: &str) -> HireloopResult<u64> {
        self.ensure_available()?;

        let (prefix, exact) = match pattern.strip_suffix('*') {
            Some(prefix) => (prefix, false),
            None => (pattern, true),
        };
        if prefix.contains('*') {
            return Err(HireloopError::Cache(format!("unsupported cache pattern '{pattern}'")));
        }

        let keys: Vec<Arc<String>> = self
            .entries
            .iter()
            .filter(|(key, _)| if exact { key.as_str() == prefix } else { key.starts_with(prefix) })
            .map(|(key, _)| key)
            .collect();

        let mut deleted = 0u64;
        for key in keys {
            if self.entries.remove(key.as_str()).await.is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

#[async_trait]
impl HealthCheck for InMemoryCache {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        match self.ensure_available() {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

impl std::fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("entries", &self.entries.entry_count())
            .field("failing", &self.failing.load(Ordering::Relaxed))
            .finish()
    }
}

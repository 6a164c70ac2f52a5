//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

mod application_service_impl;
mod job_service_impl;
mod user_service_impl;

pub use application_service_impl::ApplicationServiceImpl;
pub use job_service_impl::JobServiceImpl;
pub use user_service_impl::UserServiceImpl;

use crate::cache::ListCache;
use std::sync::Arc;
use tracing::debug;

/// Drops cached list pages after a successful write.
///
/// A write can stale more than its own endpoint: job pages embed recruiter
/// details and application counts, user pages embed job and application
/// counts. Callers name every endpoint they affect.
#[derive(Debug, Clone)]
pub(crate) struct WriteInvalidation {
    list_cache: Arc<ListCache>,
    enabled: bool,
}

impl WriteInvalidation {
    pub(crate) const fn new(list_cache: Arc<ListCache>, enabled: bool) -> Self {
        Self { list_cache, enabled }
    }

    pub(crate) fn list_cache(&self) -> &ListCache {
        &self.list_cache
    }

    pub(crate) async fn after_write(&self, endpoints: &[&str]) {
        if !self.enabled {
            debug!("Write invalidation disabled; cached lists may be stale until their TTL");
            return;
        }
        for endpoint in endpoints {
            self.list_cache.invalidate(endpoint).await;
        }
    }
}

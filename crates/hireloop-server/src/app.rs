//! Application assembly.
//!
//! [`AppBuilder`] turns an [`AppConfig`] plus storage and cache backends into
//! the [`AppState`] the router serves. The binary feeds it PostgreSQL and
//! Redis; tests feed it the in-memory doubles.

use hireloop_config::{AppConfig, CacheConfig, RedisConfig};
use hireloop_core::{HealthCheck, HireloopError, HireloopResult};
use hireloop_repository::{
    ApplicationRepository, DatabasePool, JobRepository, PgApplicationRepository, PgJobRepository, PgUserRepository,
    UserRepository,
};
use hireloop_rest::AppState;
use hireloop_security::TokenProvider;
use hireloop_service::{
    ApplicationServiceImpl, CacheInterface, InMemoryCache, JobServiceImpl, ListCache, RedisCacheService,
    UserServiceImpl,
};
use std::sync::Arc;
use tracing::{info, warn};

/// The three entity stores.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
}

impl Repositories {
    /// PostgreSQL-backed stores sharing one pool.
    #[must_use]
    pub fn postgres(pool: &Arc<DatabasePool>) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            jobs: Arc::new(PgJobRepository::new(pool.clone())),
            applications: Arc::new(PgApplicationRepository::new(pool.clone())),
        }
    }
}

/// A cache backend together with the health check reporting on it.
pub struct CacheBackend {
    pub cache: Arc<dyn CacheInterface>,
    pub health: Arc<dyn HealthCheck>,
}

impl CacheBackend {
    /// Redis when enabled, otherwise an in-process cache bounded by
    /// `cache.max_entries`.
    pub fn from_config(redis: &RedisConfig, cache: &CacheConfig) -> HireloopResult<Self> {
        if redis.enabled {
            let service = Arc::new(RedisCacheService::from_config(redis)?);
            info!("Using Redis cache at {}", redis.url);
            Ok(Self {
                cache: service.clone(),
                health: service,
            })
        } else {
            warn!("Redis disabled; list pages are cached in-process");
            Ok(Self::in_memory(InMemoryCache::with_capacity(cache.max_entries)))
        }
    }

    #[must_use]
    pub fn in_memory(cache: Arc<InMemoryCache>) -> Self {
        Self {
            cache: cache.clone(),
            health: cache,
        }
    }
}

/// Builds the router state.
pub struct AppBuilder {
    config: AppConfig,
    repositories: Option<Repositories>,
    cache: Option<CacheBackend>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppBuilder {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            repositories: None,
            cache: None,
            health_checks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_repositories(mut self, repositories: Repositories) -> Self {
        self.repositories = Some(repositories);
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: CacheBackend) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Registers an extra readiness probe, such as the database pool.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Wires services over the configured backends.
    ///
    /// Fails when no repositories were supplied. Without an explicit cache
    /// the backend is chosen from `redis` configuration.
    pub fn build(self) -> HireloopResult<AppState> {
        let repositories = self
            .repositories
            .ok_or_else(|| HireloopError::Configuration("no repositories configured".to_string()))?;
        let cache = match self.cache {
            Some(cache) => cache,
            None => CacheBackend::from_config(&self.config.redis, &self.config.cache)?,
        };

        let list_ttl = self.config.cache.list_ttl();
        let invalidate_on_write = self.config.cache.invalidate_on_write;
        let list_cache = Arc::new(ListCache::new(cache.cache, list_ttl));

        let user_service = Arc::new(UserServiceImpl::new(
            repositories.users,
            list_cache.clone(),
            invalidate_on_write,
        ));
        let job_service = Arc::new(JobServiceImpl::new(repositories.jobs, list_cache.clone(), invalidate_on_write));
        let application_service = Arc::new(ApplicationServiceImpl::new(
            repositories.applications,
            list_cache,
            invalidate_on_write,
        ));
        let token_provider = Arc::new(TokenProvider::new(Arc::new(self.config.security.clone())));

        let mut state = AppState::new(user_service, job_service, application_service, token_provider)
            .with_page_limits(self.config.pagination.into())
            .with_list_ttl(list_ttl)
            .with_detailed_errors(self.config.detailed_errors());
        for check in self.health_checks {
            state = state.with_health_check(check);
        }
        Ok(state.with_health_check(cache.health))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hireloop_core::PageLimits;
    use hireloop_repository::memory::InMemoryStore;
    use std::time::Duration;

    fn in_memory_repositories() -> Repositories {
        let store = InMemoryStore::new();
        Repositories {
            users: store.user_repository(),
            jobs: store.job_repository(),
            applications: store.application_repository(),
        }
    }

    #[test]
    fn test_build_requires_repositories() {
        let err = AppBuilder::new(AppConfig::default())
            .with_cache(CacheBackend::in_memory(InMemoryCache::new()))
            .build()
            .err().expect("build should fail without repositories");
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_build_applies_config() {
        let mut config = AppConfig::default();
        config.pagination.default_limit = 25;
        config.pagination.max_limit = 50;
        config.cache.list_ttl_secs = 15;

        let state = AppBuilder::new(config)
            .with_repositories(in_memory_repositories())
            .with_cache(CacheBackend::in_memory(InMemoryCache::new()))
            .build()
            .unwrap();

        assert_eq!(
            state.page_limits,
            PageLimits {
                default_limit: 25,
                max_limit: 50
            }
        );
        assert_eq!(state.list_ttl, Duration::from_secs(15));
        assert!(state.detailed_errors);
        assert_eq!(state.health_checks.len(), 1);
        assert_eq!(state.health_checks[0].name(), "cache");
    }

    #[test]
    fn test_production_hides_error_detail() {
        let mut config = AppConfig::default();
        config.app.environment = "production".to_string();

        let state = AppBuilder::new(config)
            .with_repositories(in_memory_repositories())
            .with_cache(CacheBackend::in_memory(InMemoryCache::new()))
            .build()
            .unwrap();

        assert!(!state.detailed_errors);
    }

    #[tokio::test]
    async fn test_disabled_redis_falls_back_to_memory() {
        let mut config = AppConfig::default();
        config.redis.enabled = false;
        config.cache.max_entries = 5;

        let backend = CacheBackend::from_config(&config.redis, &config.cache).unwrap();
        assert_eq!(backend.health.name(), "cache");
        assert!(backend.health.check().await.is_healthy());

        backend.cache.set_raw("k", "v", Duration::from_secs(60)).await.unwrap();
        assert_eq!(backend.cache.get_raw("k").await.unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_enabled_redis_with_malformed_url_fails() {
        let mut config = AppConfig::default();
        config.redis.url = "not a redis url".to_string();

        let err = CacheBackend::from_config(&config.redis, &config.cache).err().unwrap();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[tokio::test]
    async fn test_extra_health_checks_come_first() {
        let extra = InMemoryCache::new();
        let state = AppBuilder::new(AppConfig::default())
            .with_repositories(in_memory_repositories())
            .with_cache(CacheBackend::in_memory(InMemoryCache::new()))
            .with_health_check(extra)
            .build()
            .unwrap();

        assert_eq!(state.health_checks.len(), 2);
        assert!(state.health_checks[0].check().await.is_healthy());
    }
}

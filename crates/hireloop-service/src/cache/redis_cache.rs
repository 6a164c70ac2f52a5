//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use hireloop_config::RedisConfig;
use hireloop_core::{HealthCheck, HealthStatus, HireloopError, HireloopResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-based cache service.
#[derive(Clone)]
pub struct RedisCacheService {
    pool: Arc<Pool>,
}

impl RedisCacheService {
    #[must_use]
    pub const fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Builds the connection pool from configuration.
    ///
    /// Connections are opened lazily, so an unreachable server only shows
    /// up on first use and in the readiness probe.
    pub fn from_config(config: &RedisConfig) -> HireloopResult<Self> {
        let mut pool_config = deadpool_redis::Config::from_url(config.url.clone());
        pool_config.pool = Some(deadpool_redis::PoolConfig::new(config.pool_size as usize));
        let pool = pool_config
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| HireloopError::Configuration(format!("Invalid Redis configuration: {e}")))?;

        info!("Redis cache pool created (max size {})", config.pool_size);
        Ok(Self::new(Arc::new(pool)))
    }

    async fn get_conn(&self) -> HireloopResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| HireloopError::Cache(format!("Failed to get Redis connection: {e}")))
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> HireloopResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| HireloopError::Cache(format!("Failed to get key '{key}': {e}")))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> HireloopResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| HireloopError::Cache(format!("Failed to set key '{key}': {e}")))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> HireloopResult<u64> {
        let mut conn = self.get_conn().await?;

        // KEYS blocks the server; list keys are few and short-lived.
        let keys: Vec<String> = deadpool_redis::redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut conn)
            .await
            .map_err(|e| HireloopError::Cache(format!("Failed to scan keys: {e}")))?;

        if keys.is_empty() {
            return Ok(0);
        }

        let deleted: u64 = conn
            .del(&keys)
            .await
            .map_err(|e| HireloopError::Cache(format!("Failed to delete keys: {e}")))?;

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        let mut conn = match self.get_conn().await {
            Ok(conn) => conn,
            Err(e) => return HealthStatus::Unhealthy(e.to_string()),
        };

        let pong: deadpool_redis::redis::RedisResult<String> =
            deadpool_redis::redis::cmd("PING").query_async(&mut conn).await;
        match pong {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(format!("Redis ping failed: {e}")),
        }
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheService")
            .field("max_size", &status.max_size)
            .field("size", &status.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> RedisConfig {
        RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            pool_size: 2,
            ..RedisConfig::default()
        }
    }

    #[test]
    fn test_from_config_rejects_malformed_url() {
        let config = RedisConfig {
            url: "not a redis url".to_string(),
            ..RedisConfig::default()
        };
        let err = RedisCacheService::from_config(&config).unwrap_err();
        assert!(matches!(err, HireloopError::Configuration(_)));
    }

    #[test]
    fn test_from_config_builds_pool_lazily() {
        let cache = RedisCacheService::from_config(&unreachable_config()).unwrap();
        let debug = format!("{cache:?}");
        assert!(debug.contains("max_size: 2"));
        assert!(debug.contains("size: 0"));
    }

    #[tokio::test]
    async fn test_unreachable_server_surfaces_cache_errors() {
        let cache = RedisCacheService::from_config(&unreachable_config()).unwrap();

        assert!(matches!(cache.get_raw("k").await, Err(HireloopError::Cache(_))));
        assert!(matches!(cache.delete_pattern("k:*").await, Err(HireloopError::Cache(_))));
        assert!(cache.check().await.is_unhealthy());
    }
}

//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use hireloop_core::HireloopResult;
use std::time::Duration;

/// Key-value cache holding JSON strings with a per-entry TTL.
///
/// Values are type-erased so the trait stays object safe; [`CacheExt`]
/// adds typed access on top.
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Get a raw JSON value. `None` if the key is absent or expired.
    async fn get_raw(&self, key: &str) -> HireloopResult<Option<String>>;

    /// Set a raw JSON value with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> HireloopResult<()>;

    /// Delete every key matching a glob pattern (`*` wildcard).
    ///
    /// Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> HireloopResult<u64>;
}

/// Typed get/set over any [`CacheInterface`].
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get and decode a typed value.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> HireloopResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Encode and store a typed value.
    async fn set<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) -> HireloopResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}

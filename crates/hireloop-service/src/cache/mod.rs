//! Caching infrastructure for the service layer.
//!
//! [`CacheInterface`] abstracts the key-value store; [`RedisCacheService`]
//! backs it in production and [`InMemoryCache`] in tests and Redis-less
//! deployments. [`ListCache`] layers the cache-aside read path for list
//! endpoints on top.

mod cache_interface;
pub mod cache_keys;
mod list_cache;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use list_cache::{Cached, ListCache};
pub use memory_cache::InMemoryCache;
pub use redis_cache::RedisCacheService;

//! In-memory cache implementation using the moka crate.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use gatehouse_core::config::cache::MemoryCacheConfig;
use gatehouse_core::result::AppResult;
use gatehouse_core::traits::cache::CacheProvider;

/// In-memory cache provider using moka.
///
/// TTL is enforced at the cache level, set at construction time from the
/// configured entry lifetime. Session entries all share one lifetime, so
/// per-entry TTL is not needed here.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, String>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) -> AppResult<()> {
        // Cache-level TTL applies; the per-call TTL is honored by the
        // Redis provider only.
        self.cache.insert(key.to_string(), value.to_string()).await;
        debug!(key, "Cached entry in memory");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

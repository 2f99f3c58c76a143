//! No-op cache provider for environments without a backing store.

use std::time::Duration;

use async_trait::async_trait;

use gatehouse_core::result::AppResult;
use gatehouse_core::traits::cache::CacheProvider;

/// Cache provider that stores nothing.
///
/// Every lookup is a miss and every write succeeds silently, so the
/// materialization flow runs unchanged without a cache deployment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCacheProvider;

#[async_trait]
impl CacheProvider for NoopCacheProvider {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Ok(())
    }

    async fn exists(&self, _key: &str) -> AppResult<bool> {
        Ok(false)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(false)
    }
}

//! Redis-backed recipe cache.
//!
//! Entries are plain strings written with `SET` and no expiry. Connections
//! come from a `bb8` pool; checkout failures and command failures both map
//! to [`RecipeCacheError::Backend`].

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};
use bb8_redis::redis::{AsyncCommands, RedisError};
use tracing::debug;

use crate::domain::ports::{CacheKey, RecipeCache, RecipeCacheError};

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

fn map_redis_error(error: RedisError) -> RecipeCacheError {
    debug!(kind = ?error.kind(), "redis command failed");
    RecipeCacheError::backend(error.to_string())
}

/// Recipe cache adapter over a pooled Redis connection.
#[derive(Clone)]
pub struct RedisRecipeCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisRecipeCache {
    /// Build a pool for `url` (`redis://host:port/db`).
    ///
    /// Connections are opened on first use, so an unreachable server is
    /// reported by the first cache call rather than here.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeCacheError::Backend`] when the URL is invalid.
    pub async fn connect(url: &str) -> Result<Self, RecipeCacheError> {
        let manager = RedisConnectionManager::new(url).map_err(map_redis_error)?;
        let pool = Pool::builder()
            .connection_timeout(CONNECTION_TIMEOUT)
            .build(manager)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { pool })
    }

    async fn connection(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, RecipeCacheError> {
        self.pool
            .get()
            .await
            .map_err(|err| RecipeCacheError::backend(format!("redis checkout failed: {err}")))
    }
}

#[async_trait]
impl RecipeCache for RedisRecipeCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, RecipeCacheError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key.as_str()).await.map_err(map_redis_error)?;
        Ok(value)
    }

    async fn set(&self, key: &CacheKey, value: &str) -> Result<(), RecipeCacheError> {
        let mut conn = self.connection().await?;
        let (): () = conn.set(key.as_str(), value).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), RecipeCacheError> {
        let mut conn = self.connection().await?;
        let removed: u64 = conn.del(key.as_str()).await.map_err(map_redis_error)?;
        debug!(key = %key, removed, "recipe cache key deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Construction checks; command behaviour needs a live Redis server.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("not a url")]
    #[case("http://localhost:6379")]
    #[tokio::test]
    async fn connect_rejects_invalid_urls(#[case] url: &str) {
        let result = RedisRecipeCache::connect(url).await;
        assert!(matches!(result, Err(RecipeCacheError::Backend { .. })));
    }
}

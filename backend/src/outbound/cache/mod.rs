//! Recipe list cache adapters.
//!
//! [`RedisRecipeCache`] is the production adapter. [`NoOpRecipeCache`] stands
//! in when no cache URL is configured: it always misses and discards writes,
//! which turns every list call into a store read.

mod redis_cache;

use async_trait::async_trait;

use crate::domain::ports::{CacheKey, RecipeCache, RecipeCacheError};

pub use redis_cache::RedisRecipeCache;

/// Cache implementation that always misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRecipeCache;

#[async_trait]
impl RecipeCache for NoOpRecipeCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<String>, RecipeCacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &CacheKey, _value: &str) -> Result<(), RecipeCacheError> {
        Ok(())
    }

    async fn delete(&self, _key: &CacheKey) -> Result<(), RecipeCacheError> {
        Ok(())
    }
}

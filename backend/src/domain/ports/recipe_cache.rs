//! Port interface for the recipe list cache.
use async_trait::async_trait;

use super::{CacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum RecipeCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "recipe cache backend failure: {message}",
    }
}

/// Key-value cache holding serialised snapshots.
///
/// Entries carry no expiry; they live until explicitly deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCache: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, RecipeCacheError>;

    /// Store `value` under `key`, replacing any previous entry.
    async fn set(&self, key: &CacheKey, value: &str) -> Result<(), RecipeCacheError>;

    /// Remove the entry under `key`. Deleting a missing key succeeds.
    async fn delete(&self, key: &CacheKey) -> Result<(), RecipeCacheError>;
}

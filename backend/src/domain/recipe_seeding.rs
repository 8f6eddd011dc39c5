//! Initial recipe seeding.
//!
//! Fills an empty store from a list of recipe payloads. A store that already
//! holds any recipe is left alone, so restarting the server never duplicates
//! the seed set.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::domain::ports::{
    CacheKey, RecipeCache, RecipeCacheError, RecipePayload, RecipeRepository,
    RecipeRepositoryError,
};
use crate::domain::{Recipe, RecipeDraft, RecipeId, RecipeValidationError};

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingOutcome {
    /// The store was empty and `count` recipes were inserted.
    Applied { count: usize },
    /// The store already held `existing` recipes; nothing was written.
    AlreadySeeded { existing: u64 },
}

/// Errors raised while seeding recipes.
#[derive(Debug, Error)]
pub enum RecipeSeedingError {
    /// A seed entry failed validation.
    #[error("seed recipe at index {index} is invalid: {source}")]
    InvalidRecipe {
        index: usize,
        #[source]
        source: RecipeValidationError,
    },
    /// The store failed while counting or inserting.
    #[error("recipe seeding persistence error: {0}")]
    Persistence(#[from] RecipeRepositoryError),
    /// The list cache could not be invalidated after inserting.
    #[error("recipe seeding cache error: {0}")]
    Cache(#[from] RecipeCacheError),
}

/// Service that seeds an empty recipe store.
pub struct RecipeSeeder<R: ?Sized, C: ?Sized> {
    repository: Arc<R>,
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized, C: ?Sized> RecipeSeeder<R, C> {
    /// Create a seeder over the given store, cache and clock.
    pub fn new(repository: Arc<R>, cache: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            cache,
            clock,
        }
    }
}

impl<R, C> RecipeSeeder<R, C>
where
    R: RecipeRepository + ?Sized,
    C: RecipeCache + ?Sized,
{
    /// Insert `payloads` when the store is empty.
    ///
    /// Every payload is validated before anything is written; one invalid
    /// entry aborts the whole run.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeSeedingError`] if validation, persistence, or cache
    /// invalidation fails.
    pub async fn seed(
        &self,
        payloads: Vec<RecipePayload>,
    ) -> Result<SeedingOutcome, RecipeSeedingError> {
        let existing = self.repository.count().await?;
        if existing > 0 {
            return Ok(SeedingOutcome::AlreadySeeded { existing });
        }

        let published_at = self.clock.utc();
        let recipes = payloads
            .into_iter()
            .enumerate()
            .map(|(index, payload)| {
                RecipeDraft::try_from(payload)
                    .map(|draft| Recipe::new(RecipeId::random(), draft, published_at))
                    .map_err(|source| RecipeSeedingError::InvalidRecipe { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if recipes.is_empty() {
            return Ok(SeedingOutcome::Applied { count: 0 });
        }

        let count = self.repository.insert_many(&recipes).await?;
        self.cache.delete(&CacheKey::recipe_list()).await?;
        Ok(SeedingOutcome::Applied { count })
    }
}

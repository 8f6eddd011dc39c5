//! In-process adapters for running without PostgreSQL or Redis.
//!
//! Used when no database URL is configured and by the integration suites.
//! State lives only as long as the adapter instance.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CacheKey, RecipeCache, RecipeCacheError, RecipeRepository, RecipeRepositoryError,
};
use crate::domain::{Recipe, RecipeDraft, RecipeId};

/// Recipe store held in memory.
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Mutex<Vec<Recipe>>,
}

impl InMemoryRecipeRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<Recipe>>, RecipeRepositoryError> {
        self.recipes
            .lock()
            .map_err(|_| RecipeRepositoryError::query("recipe store lock poisoned"))
    }
}

fn ensure_unique(existing: &[Recipe], recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
    if existing.iter().any(|stored| stored.id() == recipe.id()) {
        return Err(RecipeRepositoryError::query(format!(
            "recipe {} already exists",
            recipe.id()
        )));
    }
    Ok(())
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        let mut guard = self.lock()?;
        ensure_unique(&guard, recipe)?;
        guard.push(recipe.clone());
        Ok(())
    }

    async fn insert_many(&self, recipes: &[Recipe]) -> Result<usize, RecipeRepositoryError> {
        let mut guard = self.lock()?;
        for (index, recipe) in recipes.iter().enumerate() {
            ensure_unique(&guard, recipe)?;
            ensure_unique(&recipes[..index], recipe)?;
        }
        guard.extend_from_slice(recipes);
        Ok(recipes.len())
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut recipes = self.lock()?.clone();
        recipes.sort_by(|a, b| {
            a.published_at()
                .cmp(&b.published_at())
                .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
        });
        Ok(recipes)
    }

    async fn update(
        &self,
        id: &RecipeId,
        draft: &RecipeDraft,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut guard = self.lock()?;
        let Some(slot) = guard.iter_mut().find(|recipe| recipe.id() == *id) else {
            return Ok(false);
        };
        *slot = slot.clone().with_draft(draft.clone());
        Ok(true)
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|recipe| recipe.id() != *id);
        Ok(guard.len() < before)
    }

    async fn count(&self) -> Result<u64, RecipeRepositoryError> {
        Ok(u64::try_from(self.lock()?.len()).unwrap_or(u64::MAX))
    }
}

/// Key-value cache held in memory.
#[derive(Debug, Default)]
pub struct InMemoryRecipeCache {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryRecipeCache {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, RecipeCacheError> {
        self.entries
            .lock()
            .map_err(|_| RecipeCacheError::backend("recipe cache lock poisoned"))
    }
}

#[async_trait]
impl RecipeCache for InMemoryRecipeCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, RecipeCacheError> {
        Ok(self.lock()?.get(key.as_str()).cloned())
    }

    async fn set(&self, key: &CacheKey, value: &str) -> Result<(), RecipeCacheError> {
        self.lock()?.insert(key.as_str().to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), RecipeCacheError> {
        self.lock()?.remove(key.as_str());
        Ok(())
    }
}

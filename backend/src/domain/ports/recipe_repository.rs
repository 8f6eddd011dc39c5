//! Port for recipe persistence.

use async_trait::async_trait;

use crate::domain::{Recipe, RecipeDraft, RecipeId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recipe repository query failed: {message}",
    }
}

/// Document store holding the authoritative recipe collection.
///
/// `find_all` returns recipes ordered by publication time, oldest first,
/// with ties broken by id, so listings are stable across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Persist a new recipe.
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError>;

    /// Persist a batch of new recipes, returning how many were written.
    async fn insert_many(&self, recipes: &[Recipe]) -> Result<usize, RecipeRepositoryError>;

    /// Read every stored recipe.
    async fn find_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Replace the content of the recipe with `id`.
    ///
    /// Returns `false` when no recipe matched. `id` and `published_at` are
    /// left untouched.
    async fn update(
        &self,
        id: &RecipeId,
        draft: &RecipeDraft,
    ) -> Result<bool, RecipeRepositoryError>;

    /// Remove the recipe with `id`, returning whether one was removed.
    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError>;

    /// Number of stored recipes.
    async fn count(&self) -> Result<u64, RecipeRepositoryError>;
}

//! Driving port for recipe reads.

use async_trait::async_trait;

use crate::domain::{Error, Recipe};

/// Request to search recipes by tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRecipesRequest {
    pub tag: Option<String>,
}

/// Driving port for recipe read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesQuery: Send + Sync {
    /// Every recipe, served from the list cache when a snapshot exists.
    async fn list_recipes(&self) -> Result<Vec<Recipe>, Error>;

    /// Recipes carrying `tag`, compared case-insensitively against whole
    /// tags. A missing or blank tag yields an empty list.
    async fn search_by_tag(&self, request: SearchRecipesRequest) -> Result<Vec<Recipe>, Error>;
}

//! Driving port for recipe mutations.
//!
//! Inbound adapters hand raw client input to this port; validation, id
//! parsing and cache invalidation all happen behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Recipe};

/// Client-supplied recipe content.
///
/// All four fields are required. Unknown fields such as `id` or
/// `publishedAt` are ignored during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    pub name: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// Request to create a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecipeRequest {
    pub recipe: RecipePayload,
}

/// Request to replace the content of an existing recipe.
///
/// `id` is the raw path segment; the service rejects malformed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecipeRequest {
    pub id: String,
    pub recipe: RecipePayload,
}

/// Request to delete a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRecipeRequest {
    pub id: String,
}

/// Driving port for recipe write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipesCommand: Send + Sync {
    /// Validate and store a new recipe, returning the stored record with its
    /// assigned id and publication time.
    async fn create(&self, request: CreateRecipeRequest) -> Result<Recipe, Error>;

    /// Overwrite the mutable fields of an existing recipe.
    ///
    /// Fails with `invalid_request` for a malformed id or payload and with
    /// `not_found` when no recipe has the id.
    async fn update(&self, request: UpdateRecipeRequest) -> Result<(), Error>;

    /// Delete a recipe. Deleting an unknown id succeeds.
    async fn delete(&self, request: DeleteRecipeRequest) -> Result<(), Error>;
}

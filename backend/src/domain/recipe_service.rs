//! Recipe domain service.
//!
//! Coordinates the recipe store and the list cache for every driving port
//! operation. The store is authoritative; the cache only ever holds a
//! serialised snapshot of the full list under one key, and every write
//! deletes that key.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    CacheKey, CreateRecipeRequest, DeleteRecipeRequest, RecipeCache, RecipeCacheError,
    RecipePayload, RecipeRepository, RecipeRepositoryError, RecipesCommand, RecipesQuery,
    SearchRecipesRequest, UpdateRecipeRequest,
};
use crate::domain::{Error, Recipe, RecipeDraft, RecipeId, RecipeIdError, RecipeValidationError};

fn map_repository_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::internal(format!("recipe store unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe store error: {message}"))
        }
    }
}

fn map_cache_error(error: RecipeCacheError) -> Error {
    match error {
        RecipeCacheError::Backend { message } => {
            Error::internal(format!("recipe cache error: {message}"))
        }
    }
}

fn map_validation_error(error: RecipeValidationError) -> Error {
    let mut details = json!({ "field": error.field(), "code": error.code() });
    if let RecipeValidationError::BlankTag { index } = error {
        details["index"] = json!(index);
    }
    Error::invalid_request(format!("invalid recipe: {error}")).with_details(details)
}

fn parse_recipe_id(raw: &str) -> Result<RecipeId, Error> {
    raw.parse::<RecipeId>().map_err(|err: RecipeIdError| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "id",
            "code": "invalid_uuid",
            "value": raw,
        }))
    })
}

fn parse_draft(payload: RecipePayload) -> Result<RecipeDraft, Error> {
    RecipeDraft::try_from(payload).map_err(map_validation_error)
}

/// Recipe service implementing the command and query driving ports.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use recipes_backend::domain::RecipeService;
/// use recipes_backend::outbound::memory::{InMemoryRecipeCache, InMemoryRecipeRepository};
///
/// let service = RecipeService::new(
///     Arc::new(InMemoryRecipeRepository::default()),
///     Arc::new(InMemoryRecipeCache::default()),
///     Arc::new(DefaultClock),
/// );
/// # let _ = service;
/// ```
pub struct RecipeService<R: ?Sized, C: ?Sized> {
    repository: Arc<R>,
    cache: Arc<C>,
    clock: Arc<dyn Clock>,
    list_key: CacheKey,
}

impl<R: ?Sized, C: ?Sized> Clone for RecipeService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
            clock: Arc::clone(&self.clock),
            list_key: self.list_key.clone(),
        }
    }
}

impl<R: ?Sized, C: ?Sized> RecipeService<R, C> {
    /// Create a service over the given store, cache and clock.
    pub fn new(repository: Arc<R>, cache: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            cache,
            clock,
            list_key: CacheKey::recipe_list(),
        }
    }
}

impl<R, C> RecipeService<R, C>
where
    R: RecipeRepository + ?Sized,
    C: RecipeCache + ?Sized,
{
    async fn invalidate_list(&self) -> Result<(), Error> {
        self.cache.delete(&self.list_key).await.map_err(|err| {
            warn!(error = %err, key = %self.list_key, "recipe list invalidation failed");
            Error::internal(format!(
                "recipe saved but the cached list could not be invalidated: {err}"
            ))
        })
    }

    async fn cached_list(&self) -> Result<Option<Vec<Recipe>>, Error> {
        let Some(snapshot) = self
            .cache
            .get(&self.list_key)
            .await
            .map_err(map_cache_error)?
        else {
            debug!(key = %self.list_key, "recipe list cache miss");
            return Ok(None);
        };

        match serde_json::from_str::<Vec<Recipe>>(&snapshot) {
            Ok(recipes) => {
                debug!(key = %self.list_key, count = recipes.len(), "recipe list cache hit");
                Ok(Some(recipes))
            }
            Err(err) => {
                warn!(error = %err, key = %self.list_key, "discarding undecodable recipe list snapshot");
                Ok(None)
            }
        }
    }

    async fn populate_list(&self, recipes: &[Recipe]) {
        let snapshot = match serde_json::to_string(recipes) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "failed to encode recipe list snapshot");
                return;
            }
        };
        if let Err(err) = self.cache.set(&self.list_key, &snapshot).await {
            warn!(error = %err, key = %self.list_key, "failed to populate recipe list cache");
        }
    }
}

#[async_trait]
impl<R, C> RecipesCommand for RecipeService<R, C>
where
    R: RecipeRepository + ?Sized,
    C: RecipeCache + ?Sized,
{
    async fn create(&self, request: CreateRecipeRequest) -> Result<Recipe, Error> {
        let draft = parse_draft(request.recipe)?;
        let recipe = Recipe::new(RecipeId::random(), draft, self.clock.utc());

        self.repository
            .insert(&recipe)
            .await
            .map_err(map_repository_error)?;
        self.invalidate_list().await?;

        debug!(recipe_id = %recipe.id(), "recipe created");
        Ok(recipe)
    }

    async fn update(&self, request: UpdateRecipeRequest) -> Result<(), Error> {
        let id = parse_recipe_id(&request.id)?;
        let draft = parse_draft(request.recipe)?;

        let updated = self
            .repository
            .update(&id, &draft)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(Error::not_found(format!("recipe {id} not found")));
        }
        self.invalidate_list().await?;

        debug!(recipe_id = %id, "recipe updated");
        Ok(())
    }

    async fn delete(&self, request: DeleteRecipeRequest) -> Result<(), Error> {
        let id = parse_recipe_id(&request.id)?;

        let removed = self
            .repository
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        self.invalidate_list().await?;

        debug!(recipe_id = %id, removed, "recipe delete handled");
        Ok(())
    }
}

#[async_trait]
impl<R, C> RecipesQuery for RecipeService<R, C>
where
    R: RecipeRepository + ?Sized,
    C: RecipeCache + ?Sized,
{
    async fn list_recipes(&self) -> Result<Vec<Recipe>, Error> {
        if let Some(recipes) = self.cached_list().await? {
            return Ok(recipes);
        }

        let recipes = self
            .repository
            .find_all()
            .await
            .map_err(map_repository_error)?;
        self.populate_list(&recipes).await;
        Ok(recipes)
    }

    async fn search_by_tag(&self, request: SearchRecipesRequest) -> Result<Vec<Recipe>, Error> {
        let Some(tag) = request.tag.filter(|tag| !tag.trim().is_empty()) else {
            return Ok(Vec::new());
        };

        let recipes = self
            .repository
            .find_all()
            .await
            .map_err(map_repository_error)?;
        Ok(recipes
            .into_iter()
            .filter(|recipe| recipe.has_tag(&tag))
            .collect())
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;

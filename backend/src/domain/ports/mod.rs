//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`RecipeRepository`], [`RecipeCache`]) describe what the
//! domain needs from storage. Driving ports ([`RecipesCommand`],
//! [`RecipesQuery`]) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod recipe_cache;
mod recipe_repository;
mod recipes_command;
mod recipes_query;

pub use cache_key::{CacheKey, RECIPE_LIST_CACHE_KEY};
#[cfg(test)]
pub use recipe_cache::MockRecipeCache;
pub use recipe_cache::{RecipeCache, RecipeCacheError};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use recipes_command::MockRecipesCommand;
pub use recipes_command::{
    CreateRecipeRequest, DeleteRecipeRequest, RecipePayload, RecipesCommand, UpdateRecipeRequest,
};
#[cfg(test)]
pub use recipes_query::MockRecipesQuery;
pub use recipes_query::{RecipesQuery, SearchRecipesRequest};

//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the recipe driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{RecipesCommand, RecipesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub recipes: Arc<dyn RecipesCommand>,
    pub recipes_query: Arc<dyn RecipesQuery>,
}

impl HttpState {
    /// Construct state from the command and query ports.
    ///
    /// A single service usually implements both; pass it twice.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use recipes_backend::domain::RecipeService;
    /// use recipes_backend::inbound::http::state::HttpState;
    /// use recipes_backend::outbound::memory::{InMemoryRecipeCache, InMemoryRecipeRepository};
    ///
    /// let service = Arc::new(RecipeService::new(
    ///     Arc::new(InMemoryRecipeRepository::default()),
    ///     Arc::new(InMemoryRecipeCache::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.recipes_query.clone();
    /// ```
    pub fn new(recipes: Arc<dyn RecipesCommand>, recipes_query: Arc<dyn RecipesQuery>) -> Self {
        Self {
            recipes,
            recipes_query,
        }
    }
}

//! Builders for recipe adapters and the HTTP state wrapping them.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;
use tracing::{info, warn};

use recipes_backend::domain::RecipeService;
use recipes_backend::domain::ports::{RecipeCache, RecipeRepository};
use recipes_backend::inbound::http::state::HttpState;
use recipes_backend::outbound::cache::{NoOpRecipeCache, RedisRecipeCache};
use recipes_backend::outbound::memory::{InMemoryRecipeCache, InMemoryRecipeRepository};
use recipes_backend::outbound::persistence::DieselRecipeRepository;

use super::ServerConfig;

/// Store and cache adapters shared by seeding and request handling.
#[derive(Clone)]
pub struct RecipeAdapters {
    pub repository: Arc<dyn RecipeRepository>,
    pub cache: Arc<dyn RecipeCache>,
}

/// Choose the recipe adapters for `config`.
///
/// - With a pool, recipes live in PostgreSQL and the list is cached in Redis
///   when a cache URL is set, otherwise not at all.
/// - Without a pool, both the store and the cache are in memory and any cache
///   URL is ignored, since a shared cache would outlive the store.
///
/// # Errors
/// Returns [`std::io::Error`] if the Redis pool cannot be built.
pub async fn build_recipe_adapters(config: &ServerConfig) -> std::io::Result<RecipeAdapters> {
    let Some(pool) = config.db_pool.as_ref() else {
        warn!("no database configured; recipes are kept in memory and lost on restart");
        if config.cache_url.is_some() {
            warn!("cache URL ignored because recipes are kept in memory");
        }
        return Ok(RecipeAdapters {
            repository: Arc::new(InMemoryRecipeRepository::default()),
            cache: Arc::new(InMemoryRecipeCache::default()),
        });
    };

    let repository: Arc<dyn RecipeRepository> =
        Arc::new(DieselRecipeRepository::new(pool.clone()));
    let cache: Arc<dyn RecipeCache> = match config.cache_url.as_deref() {
        Some(url) => {
            let cache = RedisRecipeCache::connect(url)
                .await
                .map_err(|e| std::io::Error::other(format!("recipe cache setup failed: {e}")))?;
            info!("recipe list cache enabled");
            Arc::new(cache)
        }
        None => {
            info!("no cache configured; recipe list reads go to the store");
            Arc::new(NoOpRecipeCache)
        }
    };

    Ok(RecipeAdapters { repository, cache })
}

/// Wrap the adapters in a [`RecipeService`] and expose it through both
/// driving ports.
pub fn build_http_state(adapters: &RecipeAdapters, clock: Arc<dyn Clock>) -> web::Data<HttpState> {
    let service = Arc::new(RecipeService::new(
        adapters.repository.clone(),
        adapters.cache.clone(),
        clock,
    ));
    web::Data::new(HttpState::new(service.clone(), service))
}

#[cfg(test)]
mod tests {
    //! Unit tests for adapter selection.

    use std::net::SocketAddr;

    use mockable::DefaultClock;
    use recipes_backend::domain::ports::{
        CreateRecipeRequest, RecipePayload, RecipesCommand, RecipesQuery,
    };
    use recipes_backend::settings::RunMode;
    use rstest::rstest;

    use super::*;

    fn config() -> ServerConfig {
        ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)), RunMode::Release)
    }

    #[rstest]
    #[tokio::test]
    async fn falls_back_to_memory_without_database() {
        let adapters = build_recipe_adapters(&config().with_cache_url("redis://unused"))
            .await
            .expect("adapters build");

        assert_eq!(adapters.repository.count().await.expect("count"), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn http_state_shares_one_service() {
        let adapters = build_recipe_adapters(&config())
            .await
            .expect("adapters build");
        let state = build_http_state(&adapters, Arc::new(DefaultClock));

        state
            .recipes
            .create(CreateRecipeRequest {
                recipe: RecipePayload {
                    name: "Pasta".to_owned(),
                    tags: vec!["italian".to_owned()],
                    ingredients: Vec::new(),
                    instructions: Vec::new(),
                },
            })
            .await
            .expect("create succeeds");
        let listed = state.recipes_query.list_recipes().await.expect("list");

        assert_eq!(listed.len(), 1);
        assert_eq!(adapters.repository.count().await.expect("count"), 1);
    }
}

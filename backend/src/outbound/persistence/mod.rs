//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Implements [`RecipeRepository`](crate::domain::ports::RecipeRepository)
//! over the `recipes` table through `diesel-async` with `bb8` pooling. Row
//! structs and schema definitions stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use recipes_backend::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), recipes_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
//! let repository = DieselRecipeRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_recipe_repository;
mod models;
mod pool;
mod schema;

pub use diesel_recipe_repository::DieselRecipeRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

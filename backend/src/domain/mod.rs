//! Domain primitives, services and ports.
//!
//! Purpose: define the recipe aggregate, the errors every adapter maps to,
//! and the service coordinating the recipe store with the list cache.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Recipe, RecipeDraft, RecipeId: the recipe aggregate.
//! - RecipeService: implementation of the recipe driving ports.
//! - RecipeSeeder: fills an empty store at startup.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod recipe;
pub mod recipe_seeding;
pub mod recipe_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::recipe::{Recipe, RecipeDraft, RecipeId, RecipeIdError, RecipeValidationError};
pub use self::recipe_seeding::{RecipeSeeder, RecipeSeedingError, SeedingOutcome};
pub use self::recipe_service::RecipeService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

//! Startup recipe seeding.
//!
//! Loads a JSON array of recipes from disk and hands it to
//! [`crate::domain::RecipeSeeder`] so an empty store starts with content.

mod startup;

pub use startup::{StartupSeedingError, seed_recipes_on_startup};

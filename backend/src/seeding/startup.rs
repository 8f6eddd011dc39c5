//! Startup seeding orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{RecipeCache, RecipePayload, RecipeRepository};
use crate::domain::{RecipeSeeder, RecipeSeedingError, SeedingOutcome};

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Seed file could not be read.
    #[error("failed to read seed file at {path}: {source}")]
    SeedRead {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Seed file is not a JSON array of recipes.
    #[error("failed to parse seed file at {path}: {source}")]
    SeedParse {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// Validation or persistence failed.
    #[error("recipe seeding error: {0}")]
    Seeding(#[from] RecipeSeedingError),
}

/// Seed the recipe store from `seed_path` when one is configured.
///
/// Returns `Ok(None)` when seeding is not configured.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use recipes_backend::outbound::memory::{InMemoryRecipeCache, InMemoryRecipeRepository};
/// use recipes_backend::seeding::seed_recipes_on_startup;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = seed_recipes_on_startup(
///     Some(Path::new("fixtures/recipes.json")),
///     Arc::new(InMemoryRecipeRepository::default()),
///     Arc::new(InMemoryRecipeCache::default()),
///     Arc::new(DefaultClock),
/// )
/// .await?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`StartupSeedingError`] if the file cannot be read or parsed, or if
/// the seeder fails.
pub async fn seed_recipes_on_startup(
    seed_path: Option<&Path>,
    repository: Arc<dyn RecipeRepository>,
    cache: Arc<dyn RecipeCache>,
    clock: Arc<dyn Clock>,
) -> Result<Option<SeedingOutcome>, StartupSeedingError> {
    let Some(path) = seed_path else {
        info!(reason = "not configured", "recipe seeding skipped");
        return Ok(None);
    };

    let payloads = load_seed_file(path)?;
    let seeder = RecipeSeeder::new(repository, cache, clock);
    let outcome = seeder.seed(payloads).await?;

    match outcome {
        SeedingOutcome::Applied { count } => {
            info!(path = %path.display(), count, "recipe seeding applied");
        }
        SeedingOutcome::AlreadySeeded { existing } => {
            info!(existing, "recipes already seeded; skipping");
        }
    }

    Ok(Some(outcome))
}

fn load_seed_file(path: &Path) -> Result<Vec<RecipePayload>, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::SeedRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read(Path::new(file_name)).map_err(read_error)?;

    serde_json::from_slice(&contents).map_err(|source| StartupSeedingError::SeedParse {
        path: path.to_path_buf(),
        source,
    })
}

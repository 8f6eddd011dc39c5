//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! Rows are converted back through `RecipeDraft::new`, so a row that breaks
//! the recipe invariants surfaces as a query error instead of leaking into
//! the domain.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{Recipe, RecipeDraft, RecipeId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewRecipeRow, RecipeChangeset, RecipeRow};
use super::pool::DbPool;
use super::schema::recipes;

/// Diesel-backed implementation of the recipe repository port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn new_row(recipe: &Recipe) -> NewRecipeRow<'_> {
    NewRecipeRow {
        id: *recipe.id().as_uuid(),
        name: recipe.name(),
        tags: recipe.tags(),
        ingredients: recipe.ingredients(),
        instructions: recipe.instructions(),
        published_at: recipe.published_at(),
    }
}

fn row_to_recipe(row: RecipeRow) -> Result<Recipe, RecipeRepositoryError> {
    let RecipeRow {
        id,
        name,
        tags,
        ingredients,
        instructions,
        published_at,
    } = row;

    let draft = RecipeDraft::new(name, tags, ingredients, instructions).map_err(|err| {
        RecipeRepositoryError::query(format!("stored recipe {id} is invalid: {err}"))
    })?;
    Ok(Recipe::new(RecipeId::from_uuid(id), draft, published_at))
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn insert(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(recipes::table)
            .values(&new_row(recipe))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn insert_many(&self, batch: &[Recipe]) -> Result<usize, RecipeRepositoryError> {
        if batch.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewRecipeRow<'_>> = batch.iter().map(new_row).collect();

        diesel::insert_into(recipes::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn find_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .order((recipes::published_at.asc(), recipes::id.asc()))
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_recipe).collect()
    }

    async fn update(
        &self,
        id: &RecipeId,
        draft: &RecipeDraft,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = RecipeChangeset {
            name: draft.name(),
            tags: draft.tags(),
            ingredients: draft.ingredients(),
            instructions: draft.instructions(),
        };

        let affected = diesel::update(recipes::table.filter(recipes::id.eq(id.as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(recipes::table.filter(recipes::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn count(&self) -> Result<u64, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = recipes::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(total)
            .map_err(|_| RecipeRepositoryError::query(format!("invalid recipe count {total}")))
    }
}

//! Recipe HTTP handlers.
//!
//! ```text
//! POST   /recipes
//! GET    /recipes
//! GET    /recipes/search?tag={tag}
//! PUT    /recipes/{id}
//! DELETE /recipes/{id}
//! ```
//!
//! Handlers only translate between wire shapes and the recipe driving
//! ports; validation and cache coordination live in the domain service.

use actix_web::{HttpRequest, delete, get, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Recipe;
use crate::domain::ports::{
    CreateRecipeRequest, DeleteRecipeRequest, RecipePayload, SearchRecipesRequest,
    UpdateRecipeRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Success message returned by `PUT /recipes/{id}`.
pub const RECIPE_UPDATED_MESSAGE: &str = "Recipe has been updated";
/// Success message returned by `DELETE /recipes/{id}`.
pub const RECIPE_DELETED_MESSAGE: &str = "Recipe has been deleted";

/// Recipe content supplied by clients.
///
/// Every field is required. `id` and `publishedAt` are assigned by the
/// server and ignored if present.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequestBody {
    #[schema(example = "Pasta")]
    pub name: String,
    #[schema(example = json!(["italian"]))]
    pub tags: Vec<String>,
    #[schema(example = json!(["penne", "tomato sauce"]))]
    pub ingredients: Vec<String>,
    #[schema(example = json!(["Boil the pasta", "Add the sauce"]))]
    pub instructions: Vec<String>,
}

impl From<RecipeRequestBody> for RecipePayload {
    fn from(value: RecipeRequestBody) -> Self {
        Self {
            name: value.name,
            tags: value.tags,
            ingredients: value.ingredients,
            instructions: value.instructions,
        }
    }
}

/// Stored recipe as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[schema(format = "date-time")]
    pub published_at: String,
}

impl From<&Recipe> for RecipeResponseBody {
    fn from(value: &Recipe) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_owned(),
            tags: value.tags().to_vec(),
            ingredients: value.ingredients().to_vec(),
            instructions: value.instructions().to_vec(),
            published_at: value
                .published_at()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

fn to_bodies(recipes: &[Recipe]) -> Vec<RecipeResponseBody> {
    recipes.iter().map(RecipeResponseBody::from).collect()
}

/// Confirmation payload for updates and deletes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageResponseBody {
    #[schema(example = "Recipe has been updated")]
    pub message: String,
}

impl MessageResponseBody {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// Query string for tag search.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Tag to match, ignoring case. Missing or blank yields an empty list.
    #[param(example = "italian")]
    pub tag: Option<String>,
}

impl SearchParams {
    /// Read the first `tag` pair of a raw query string.
    ///
    /// Repeated keys and unrelated pairs are ignored, so parsing never fails.
    /// Invalid percent-encoding decodes lossily.
    ///
    /// # Examples
    /// ```
    /// use recipes_backend::inbound::http::recipes::SearchParams;
    ///
    /// let params = SearchParams::from_query("tag=italian&tag=quick");
    /// assert_eq!(params.tag.as_deref(), Some("italian"));
    /// assert_eq!(SearchParams::from_query("page=2").tag, None);
    /// ```
    pub fn from_query(query: &str) -> Self {
        let tag = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "tag")
            .map(|(_, value)| value.into_owned());
        Self { tag }
    }
}

/// Create a recipe.
#[utoipa::path(
    post,
    path = "/recipes",
    request_body = RecipeRequestBody,
    responses(
        (status = 200, description = "Recipe created", body = RecipeResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    payload: web::Json<RecipeRequestBody>,
) -> ApiResult<web::Json<RecipeResponseBody>> {
    let recipe = state
        .recipes
        .create(CreateRecipeRequest {
            recipe: payload.into_inner().into(),
        })
        .await?;

    Ok(web::Json(RecipeResponseBody::from(&recipe)))
}

/// List every recipe.
#[utoipa::path(
    get,
    path = "/recipes",
    responses(
        (status = 200, description = "All recipes", body = [RecipeResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RecipeResponseBody>>> {
    let recipes = state.recipes_query.list_recipes().await?;
    Ok(web::Json(to_bodies(&recipes)))
}

/// Search recipes by tag.
#[utoipa::path(
    get,
    path = "/recipes/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching recipes", body = [RecipeResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "searchRecipes"
)]
#[get("/recipes/search")]
pub async fn search_recipes(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<Vec<RecipeResponseBody>>> {
    let params = SearchParams::from_query(req.query_string());
    let recipes = state
        .recipes_query
        .search_by_tag(SearchRecipesRequest { tag: params.tag })
        .await?;
    Ok(web::Json(to_bodies(&recipes)))
}

/// Replace the content of a recipe.
#[utoipa::path(
    put,
    path = "/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier (UUID)")),
    request_body = RecipeRequestBody,
    responses(
        (status = 200, description = "Recipe updated", body = MessageResponseBody),
        (status = 400, description = "Invalid id or body", body = ErrorSchema),
        (status = 404, description = "Recipe not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[put("/recipes/{id}")]
pub async fn update_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RecipeRequestBody>,
) -> ApiResult<web::Json<MessageResponseBody>> {
    state
        .recipes
        .update(UpdateRecipeRequest {
            id: path.into_inner(),
            recipe: payload.into_inner().into(),
        })
        .await?;

    Ok(web::Json(MessageResponseBody::new(RECIPE_UPDATED_MESSAGE)))
}

/// Delete a recipe. Unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    params(("id" = String, Path, description = "Recipe identifier (UUID)")),
    responses(
        (status = 200, description = "Recipe deleted", body = MessageResponseBody),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponseBody>> {
    state
        .recipes
        .delete(DeleteRecipeRequest {
            id: path.into_inner(),
        })
        .await?;

    Ok(web::Json(MessageResponseBody::new(RECIPE_DELETED_MESSAGE)))
}

/// Register the recipe routes and the JSON error handler.
///
/// The search route is registered ahead of the `{id}` routes so the literal
/// segment always wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(search_recipes)
        .service(create_recipe)
        .service(list_recipes)
        .service(update_recipe)
        .service(delete_recipe);
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;

//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every recipe and health endpoint plus the domain
//! error schema wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]), which keep
//! utoipa out of the domain layer.
//!
//! The document is served by Swagger UI in the debug run mode and exported
//! via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::recipes::{MessageResponseBody, RecipeRequestBody, RecipeResponseBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipes API",
        description = "Create, list, update, delete and tag-search recipes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::search_recipes,
        crate::inbound::http::recipes::update_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RecipeRequestBody,
        RecipeResponseBody,
        MessageResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "recipes", description = "Recipe records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn recipe_schema_uses_camel_case_timestamp() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let recipe = schemas
            .get("RecipeResponseBody")
            .expect("RecipeResponseBody schema");

        assert_object_schema_has_field(recipe, "publishedAt");
        assert_object_schema_has_field(recipe, "tags");
    }

    #[rstest]
    #[case("/recipes")]
    #[case("/recipes/search")]
    #[case("/recipes/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn recipe_item_path_has_put_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/recipes/{id}").expect("item path");
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
        assert!(item.get.is_none());
    }
}

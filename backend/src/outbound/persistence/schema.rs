//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/sql/recipes.sql` exactly. The table
//! is provisioned out of band; the server never creates or alters it.

diesel::table! {
    /// Recipe documents.
    ///
    /// The `id` column is the primary key (UUID v4). List columns are text
    /// arrays that preserve client ordering.
    recipes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Free-text recipe name.
        name -> Text,
        /// Search tags, compared case-insensitively by the domain.
        tags -> Array<Text>,
        /// Ingredient lines.
        ingredients -> Array<Text>,
        /// Instruction steps.
        instructions -> Array<Text>,
        /// Server-assigned publication timestamp.
        published_at -> Timestamptz,
    }
}

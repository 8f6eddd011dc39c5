//! Recipe aggregate and its identifier.
//!
//! A [`Recipe`] is created once from a validated [`RecipeDraft`], at which
//! point the server assigns its [`RecipeId`] and publication timestamp.
//! Updates swap the draft portion only; identity and `published_at` never
//! change after creation.

use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::ports::RecipePayload;

/// Opaque recipe identifier (UUID v4).
///
/// # Examples
/// ```
/// use recipes_backend::domain::RecipeId;
///
/// let id: RecipeId = "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!("not-an-id".parse::<RecipeId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Allocate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, e.g. one loaded from storage.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while parsing a [`RecipeId`] from client input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeIdError {
    /// The identifier was empty.
    #[error("recipe id must not be empty")]
    Empty,
    /// The identifier is not a well-formed UUID.
    #[error("recipe id must be a valid UUID")]
    Malformed,
}

impl FromStr for RecipeId {
    type Err = RecipeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(RecipeIdError::Empty);
        }
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| RecipeIdError::Malformed)
    }
}

/// Validation failures for recipe content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeValidationError {
    /// The recipe name is empty once trimmed.
    #[error("recipe name must not be blank")]
    BlankName,
    /// A tag is empty once trimmed.
    #[error("tag at index {index} must not be blank")]
    BlankTag { index: usize },
}

impl RecipeValidationError {
    /// Payload field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankName => "name",
            Self::BlankTag { .. } => "tags",
        }
    }

    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankName => "blank_name",
            Self::BlankTag { .. } => "blank_tag",
        }
    }
}

/// The user-controlled portion of a recipe.
///
/// ## Invariants
/// - `name` is not blank.
/// - No tag is blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    name: String,
    tags: Vec<String>,
    ingredients: Vec<String>,
    instructions: Vec<String>,
}

impl RecipeDraft {
    /// Validate and assemble a draft.
    ///
    /// # Examples
    /// ```
    /// use recipes_backend::domain::{RecipeDraft, RecipeValidationError};
    ///
    /// let draft = RecipeDraft::new("Pasta", vec!["italian".into()], vec![], vec![]);
    /// assert!(draft.is_ok());
    ///
    /// let blank = RecipeDraft::new("  ", vec![], vec![], vec![]);
    /// assert_eq!(blank, Err(RecipeValidationError::BlankName));
    /// ```
    pub fn new(
        name: impl Into<String>,
        tags: Vec<String>,
        ingredients: Vec<String>,
        instructions: Vec<String>,
    ) -> Result<Self, RecipeValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RecipeValidationError::BlankName);
        }
        if let Some(index) = tags.iter().position(|tag| tag.trim().is_empty()) {
            return Err(RecipeValidationError::BlankTag { index });
        }
        Ok(Self {
            name,
            tags,
            ingredients,
            instructions,
        })
    }

    /// Recipe name; never blank.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tags; none of them blank.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Ingredient lines, possibly empty.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Preparation steps, possibly empty.
    pub fn instructions(&self) -> &[String] {
        &self.instructions
    }
}

impl TryFrom<RecipePayload> for RecipeDraft {
    type Error = RecipeValidationError;

    fn try_from(value: RecipePayload) -> Result<Self, Self::Error> {
        let RecipePayload {
            name,
            tags,
            ingredients,
            instructions,
        } = value;
        Self::new(name, tags, ingredients, instructions)
    }
}

/// A stored recipe.
///
/// Serialises to the camelCase wire form used by both the HTTP surface and
/// the cached list snapshot. Deserialisation re-validates the content, so a
/// tampered snapshot fails to decode instead of producing an invalid value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecipeDto", into = "RecipeDto")]
pub struct Recipe {
    id: RecipeId,
    draft: RecipeDraft,
    published_at: DateTime<Utc>,
}

impl Recipe {
    /// Assemble a recipe from its identity, content and publication time.
    ///
    /// `published_at` is truncated to microseconds, the finest precision the
    /// PostgreSQL store keeps, so a recipe reads back exactly as created.
    pub fn new(id: RecipeId, draft: RecipeDraft, published_at: DateTime<Utc>) -> Self {
        Self {
            id,
            draft,
            published_at: published_at.trunc_subsecs(6),
        }
    }

    /// Server-assigned identifier.
    pub fn id(&self) -> RecipeId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.draft.name()
    }

    /// Tags in the order the client supplied them.
    pub fn tags(&self) -> &[String] {
        self.draft.tags()
    }

    /// Ingredient lines.
    pub fn ingredients(&self) -> &[String] {
        self.draft.ingredients()
    }

    /// Ordered preparation steps.
    pub fn instructions(&self) -> &[String] {
        self.draft.instructions()
    }

    /// Creation time, fixed for the life of the recipe.
    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// Replace the mutable content, keeping `id` and `published_at`.
    #[must_use]
    pub fn with_draft(self, draft: RecipeDraft) -> Self {
        Self { draft, ..self }
    }

    /// Whether any tag equals `tag`, ignoring case.
    ///
    /// Matching is whole-tag: `"Italian"` matches `"italian"` but not
    /// `"italian-style"`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use recipes_backend::domain::{Recipe, RecipeDraft, RecipeId};
    ///
    /// let draft = RecipeDraft::new("Pasta", vec!["italian".into()], vec![], vec![])
    ///     .expect("valid draft");
    /// let recipe = Recipe::new(RecipeId::random(), draft, Utc::now());
    /// assert!(recipe.has_tag("Italian"));
    /// assert!(!recipe.has_tag("ital"));
    /// ```
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags().iter().any(|candidate| candidate.to_lowercase() == needle)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeDto {
    id: RecipeId,
    name: String,
    tags: Vec<String>,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    published_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeDto {
    fn from(value: Recipe) -> Self {
        let Recipe {
            id,
            draft,
            published_at,
        } = value;
        Self {
            id,
            name: draft.name,
            tags: draft.tags,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            published_at,
        }
    }
}

impl TryFrom<RecipeDto> for Recipe {
    type Error = RecipeValidationError;

    fn try_from(value: RecipeDto) -> Result<Self, Self::Error> {
        let draft = RecipeDraft::new(
            value.name,
            value.tags,
            value.ingredients,
            value.instructions,
        )?;
        Ok(Self::new(value.id, draft, value.published_at))
    }
}

#[cfg(test)]
mod tests {
    //! Validation, tag matching and snapshot encoding for recipes.

    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn pasta() -> Recipe {
        let draft = RecipeDraft::new(
            "Pasta",
            vec!["italian".to_owned(), "Quick".to_owned()],
            vec!["penne".to_owned()],
            vec!["boil".to_owned()],
        )
        .expect("valid draft");
        Recipe::new(RecipeId::random(), draft, Utc::now())
    }

    #[rstest]
    #[case("italian", true)]
    #[case("Italian", true)]
    #[case("ITALIAN", true)]
    #[case("quick", true)]
    #[case("italian-style", false)]
    #[case("ital", false)]
    #[case("", false)]
    fn has_tag_matches_whole_tags_ignoring_case(
        pasta: Recipe,
        #[case] query: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(pasta.has_tag(query), expected);
    }

    #[rstest]
    fn has_tag_does_not_match_partial_tag() {
        let draft = RecipeDraft::new("Risotto", vec!["italian-style".to_owned()], vec![], vec![])
            .expect("valid draft");
        let recipe = Recipe::new(RecipeId::random(), draft, Utc::now());

        assert!(!recipe.has_tag("Italian"));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn draft_rejects_blank_name(#[case] name: &str) {
        let err = RecipeDraft::new(name, vec![], vec![], vec![]).expect_err("blank name");
        assert_eq!(err, RecipeValidationError::BlankName);
        assert_eq!(err.field(), "name");
    }

    #[rstest]
    fn draft_reports_index_of_blank_tag() {
        let err = RecipeDraft::new(
            "Soup",
            vec!["warm".to_owned(), " ".to_owned()],
            vec![],
            vec![],
        )
        .expect_err("blank tag");
        assert_eq!(err, RecipeValidationError::BlankTag { index: 1 });
        assert_eq!(err.code(), "blank_tag");
    }

    #[rstest]
    fn draft_accepts_empty_collections() {
        let draft = RecipeDraft::new("Toast", vec![], vec![], vec![]).expect("valid draft");
        assert!(draft.tags().is_empty());
    }

    #[rstest]
    #[case("", RecipeIdError::Empty)]
    #[case("   ", RecipeIdError::Empty)]
    #[case("123", RecipeIdError::Malformed)]
    #[case("61f0c404-5cb3-11e7-907b", RecipeIdError::Malformed)]
    fn recipe_id_rejects_bad_input(#[case] raw: &str, #[case] expected: RecipeIdError) {
        assert_eq!(raw.parse::<RecipeId>(), Err(expected));
    }

    #[rstest]
    fn with_draft_keeps_identity_and_timestamp(pasta: Recipe) {
        let replacement =
            RecipeDraft::new("Pasta al forno", vec!["baked".to_owned()], vec![], vec![])
                .expect("valid draft");
        let updated = pasta.clone().with_draft(replacement);

        assert_eq!(updated.id(), pasta.id());
        assert_eq!(updated.published_at(), pasta.published_at());
        assert_eq!(updated.name(), "Pasta al forno");
        assert_eq!(updated.tags(), ["baked".to_owned()]);
    }

    #[rstest]
    fn publication_time_keeps_microsecond_precision() {
        let precise = Utc
            .timestamp_opt(1_773_478_800, 123_456_789)
            .single()
            .expect("valid timestamp");
        let draft = RecipeDraft::new("Toast", vec![], vec![], vec![]).expect("valid draft");

        let recipe = Recipe::new(RecipeId::random(), draft, precise);

        assert_eq!(recipe.published_at().timestamp_subsec_nanos(), 123_456_000);
        let value = serde_json::to_value(&recipe).expect("serialise recipe");
        let restored: Recipe = serde_json::from_value(value).expect("deserialise recipe");
        assert_eq!(restored, recipe);
    }

    #[rstest]
    fn serialises_camel_case_wire_form(pasta: Recipe) {
        let value = serde_json::to_value(&pasta).expect("serialise recipe");

        assert_eq!(value["id"], json!(pasta.id().to_string()));
        assert_eq!(value["name"], json!("Pasta"));
        assert_eq!(value["tags"], json!(["italian", "Quick"]));
        assert!(value.get("publishedAt").is_some());
        assert!(value.get("published_at").is_none());
    }

    #[rstest]
    fn deserialising_blank_name_fails() {
        let result: Result<Recipe, _> = serde_json::from_value(json!({
            "id": RecipeId::random().to_string(),
            "name": "",
            "tags": [],
            "ingredients": [],
            "instructions": [],
            "publishedAt": "2024-05-01T10:00:00Z",
        }));

        assert!(result.is_err());
    }
}

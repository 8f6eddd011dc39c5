//! Cache key type shared by recipe cache adapters.

/// Key under which the full recipe list snapshot is stored.
///
/// The version segment lets a future change to the snapshot encoding move to
/// a fresh key instead of decoding stale entries.
pub const RECIPE_LIST_CACHE_KEY: &str = "recipes:v1:all";

/// Namespaced cache key.
///
/// Keys are only minted by the associated constructors, so adapters can pass
/// them to the backing store verbatim.
///
/// # Examples
/// ```
/// use recipes_backend::domain::ports::CacheKey;
///
/// let key = CacheKey::recipe_list();
/// assert_eq!(key.as_str(), "recipes:v1:all");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key of the recipe list snapshot.
    pub fn recipe_list() -> Self {
        Self(RECIPE_LIST_CACHE_KEY.to_owned())
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Diesel error mapping shared by the recipe repository.

use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::RecipeRepositoryError;

/// Pool failures always mean the store is unreachable.
pub(super) fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    RecipeRepositoryError::connection(error.into_message())
}

/// Map Diesel errors into repository errors without leaking SQL details.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => RecipeRepositoryError::query("record not found"),
        DieselError::DeserializationError(_) => {
            RecipeRepositoryError::query("stored recipe could not be decoded")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecipeRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RecipeRepositoryError::query("recipe id already exists")
        }
        _ => RecipeRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_maps_to_query() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert_eq!(err, RecipeRepositoryError::query("record not found"));
    }

    #[rstest]
    fn pool_checkout_maps_to_connection() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, RecipeRepositoryError::connection("timed out"));
    }
}

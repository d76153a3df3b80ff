//! Repository error type and shared helpers

use desk_core::error::DeskError;
use desk_core::traits::Id;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: Id },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: Id) -> Self {
        RepositoryError::NotFound { entity, id }
    }

    /// Turn a foreign-key violation into a conflict carrying `message`
    pub(crate) fn from_write(err: sqlx::Error, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                RepositoryError::Conflict(message.to_string())
            }
            _ => RepositoryError::Database(err),
        }
    }

    /// Turn a foreign-key violation on insert into a miss on the referenced row
    pub(crate) fn from_insert(err: sqlx::Error, entity: &'static str, id: Id) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                RepositoryError::not_found(entity, id)
            }
            _ => RepositoryError::Database(err),
        }
    }
}

impl From<RepositoryError> for DeskError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => DeskError::not_found(entity, id),
            RepositoryError::Conflict(message) => DeskError::conflict(message),
            RepositoryError::Database(e) => {
                tracing::error!(error = %e, "Store operation failed");
                DeskError::Database(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_desk_error() {
        let err: DeskError = RepositoryError::not_found("Issue", 4).into();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "Issue with id 4 not found");

        let err: DeskError = RepositoryError::Conflict("busy".to_string()).into();
        assert_eq!(err.status_code(), 409);

        let err: DeskError = RepositoryError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_non_constraint_write_error_stays_database() {
        let err = RepositoryError::from_write(sqlx::Error::RowNotFound, "conflict");
        assert!(matches!(err, RepositoryError::Database(_)));

        let err = RepositoryError::from_insert(sqlx::Error::RowNotFound, "Employee", 3);
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}

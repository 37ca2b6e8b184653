//! Database error types for pis-db.

use pis_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The addressed entity does not exist.
    #[error("Not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Payload rejected before any write.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The write would clash with existing rows.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::Other(e) => Self::Other(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_validation_maps_to_database_validation() {
        let err = DatabaseError::from(CoreError::Validation("suite_id must be positive".into()));
        assert!(matches!(err, DatabaseError::Validation(ref msg) if msg == "suite_id must be positive"), "{err}");
    }
}

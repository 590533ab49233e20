//! StoreError type shared by the storage engine, repositories and search.

use crate::domain::{
    EntityKind, ParseKindError, ParsePriorityError, ParseTagError, ValidationError,
};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller-supplied data violates a record invariant. Nothing was written.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The referenced record does not exist.
    #[error("{kind} #{id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored row could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        StoreError::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

impl From<ParsePriorityError> for StoreError {
    fn from(err: ParsePriorityError) -> Self {
        StoreError::Validation(err.into())
    }
}

impl From<ParseTagError> for StoreError {
    fn from(err: ParseTagError) -> Self {
        StoreError::Validation(ValidationError::new(err.to_string()))
    }
}

impl From<ParseKindError> for StoreError {
    fn from(err: ParseKindError) -> Self {
        StoreError::Validation(ValidationError::new(err.to_string()))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = StoreError::not_found(EntityKind::Todo, 42);
        assert_eq!(err.to_string(), "todo #42 not found");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn priority_parse_error_is_validation() {
        let err: StoreError = "urgent".parse::<Priority>().unwrap_err().into();
        assert!(err.is_validation());
    }

    #[test]
    fn database_errors_convert() {
        let err: StoreError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, StoreError::Database(_)));
    }
}

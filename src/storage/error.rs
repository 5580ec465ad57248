//! Storage-level failures raised by store adapters.
//!
//! These errors never cross the repository boundary: repositories wrap them in
//! [`crate::error::RepositoryError`] together with the failed operation.

use std::sync::Arc;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised when a durable read or write fails.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A schema constraint rejected the write (not-null, check, foreign key).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The database engine reported a failure.
    #[error("database error: {0}")]
    Database(Arc<dyn std::error::Error + Send + Sync>),

    /// A connection could not be obtained or the worker thread failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// A persisted value could not be mapped to or from its domain type.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Creates a database error from any error type.
    #[must_use]
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Database(Arc::new(err))
    }

    /// Creates a constraint violation error.
    #[must_use]
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint(message.into())
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Returns `true` when the failure was a constraint violation.
    #[must_use]
    pub const fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                ref info,
            ) => Self::Constraint(info.message().to_owned()),
            _ => Self::database(err),
        }
    }
}

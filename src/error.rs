//! The single failure kind surfaced by repositories.
//!
//! Store adapters raise [`StoreError`]; repositories catch every one of them
//! and re-signal it as a [`RepositoryError`] naming the operation that failed.
//! The original error stays reachable through [`std::error::Error::source`].

use std::fmt;

use thiserror::Error;

use crate::storage::StoreError;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository operation that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Adding a contact.
    AddContact,
    /// Updating a contact.
    UpdateContact,
    /// Deleting a contact.
    DeleteContact,
    /// Listing contacts.
    ListContacts,
    /// Looking up a contact by phone number.
    FindContactByPhone,
    /// Looking up a contact by identifier.
    FindContactById,
    /// Adding a message.
    AddMessage,
    /// Listing a contact's messages.
    ListMessages,
}

impl RepositoryOperation {
    /// Returns the human-readable failure message for this operation.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::AddContact => "failed to add contact",
            Self::UpdateContact => "failed to update contact",
            Self::DeleteContact => "failed to delete contact",
            Self::ListContacts => "failed to load contacts",
            Self::FindContactByPhone => "failed to find contact by phone",
            Self::FindContactById => "failed to find contact by id",
            Self::AddMessage => "failed to add message",
            Self::ListMessages => "failed to load messages",
        }
    }
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_message())
    }
}

/// A repository call failed; wraps the underlying storage cause.
#[derive(Debug, Clone, Error)]
#[error("{operation}: {source}")]
pub struct RepositoryError {
    operation: RepositoryOperation,
    #[source]
    source: StoreError,
}

impl RepositoryError {
    /// Creates a repository error for `operation` caused by `source`.
    #[must_use]
    pub const fn new(operation: RepositoryOperation, source: StoreError) -> Self {
        Self { operation, source }
    }

    /// Returns the operation that failed.
    #[must_use]
    pub const fn operation(&self) -> RepositoryOperation {
        self.operation
    }

    /// Returns the storage failure that caused this error.
    #[must_use]
    pub const fn cause(&self) -> &StoreError {
        &self.source
    }
}

/// Extension for mapping store results into repository results.
pub(crate) trait StoreResultExt<T> {
    /// Wraps a store failure with the operation that was attempted.
    fn during(self, operation: RepositoryOperation) -> RepositoryResult<T>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn during(self, operation: RepositoryOperation) -> RepositoryResult<T> {
        self.map_err(|source| {
            tracing::warn!(%operation, error = %source, "repository operation failed");
            RepositoryError::new(operation, source)
        })
    }
}

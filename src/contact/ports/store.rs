//! Store port for durable contact rows.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::contact::domain::{Contact, ContactDetails, ContactId};
use crate::storage::StoreResult;

/// Durable contact table keyed by [`ContactId`] with a secondary lookup by
/// phone number.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - Identifiers are assigned on insert and never reused
/// - `find_all` is ordered by name ascending, ties by identifier
/// - `find_by_phone` returns the lowest identifier when several contacts share
///   a phone number
/// - Deleting a contact also deletes its messages
/// - Every successful write is signalled on the [`changes`](Self::changes)
///   channel
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Inserts a new contact and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` on constraint violation or I/O failure.
    async fn insert(&self, details: &ContactDetails) -> StoreResult<ContactId>;

    /// Replaces every field of the contact with the same identifier.
    ///
    /// Returns `false` when no row matched; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` on constraint violation or I/O failure.
    async fn update(&self, contact: &Contact) -> StoreResult<bool>;

    /// Deletes the contact with the given identifier.
    ///
    /// Returns `false` when no row matched; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` on I/O failure.
    async fn delete(&self, id: ContactId) -> StoreResult<bool>;

    /// Returns every contact ordered by name.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the query fails.
    async fn find_all(&self) -> StoreResult<Vec<Contact>>;

    /// Returns the first contact with exactly this phone number.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the query fails.
    async fn find_by_phone(&self, phone: &str) -> StoreResult<Option<Contact>>;

    /// Returns the contact with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the query fails.
    async fn find_by_id(&self, id: ContactId) -> StoreResult<Option<Contact>>;

    /// Subscribes to change signals for the contact table.
    fn changes(&self) -> watch::Receiver<u64>;
}

//! Store port for durable message rows.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::contact::domain::ContactId;
use crate::message::domain::{Message, MessageId, NewMessage};
use crate::storage::StoreResult;

/// Append-only message table queried by owning contact.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - Identifiers increase with insertion order and are never reused
/// - Inserting a message for a contact that does not exist fails with a
///   constraint error
/// - Messages are immutable after storage (no update operations)
/// - Every successful insert, and every cascade from a contact delete, is
///   signalled on the [`changes`](Self::changes) channel
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Inserts a new message and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` on constraint violation or I/O failure.
    async fn insert(&self, message: &NewMessage) -> StoreResult<MessageId>;

    /// Returns the conversation with a contact, ordered by timestamp
    /// ascending and then by identifier.
    ///
    /// Returns an empty vector when the contact has no messages.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the query fails.
    async fn find_for_contact(&self, contact_id: ContactId) -> StoreResult<Vec<Message>>;

    /// Subscribes to change signals for the message table.
    fn changes(&self) -> watch::Receiver<u64>;
}

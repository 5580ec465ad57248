//! Shared in-memory database backing the memory store adapters.
//!
//! Holds both tables behind one lock so cascades and foreign key checks see a
//! consistent view, mirroring a single transactional file store. Suitable for
//! tests and previews; nothing is persisted.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::contact::domain::{ContactDetails, ContactId};
use crate::message::domain::{MessageId, NewMessage};

use super::{ChangeNotifier, StoreError, StoreResult};

/// Row data for both tables.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) contacts: BTreeMap<ContactId, ContactDetails>,
    pub(crate) messages: BTreeMap<MessageId, NewMessage>,
    last_contact_id: i64,
    last_message_id: i64,
}

impl Tables {
    /// Allocates the next contact identifier; identifiers are never reused.
    pub(crate) fn next_contact_id(&mut self) -> StoreResult<ContactId> {
        self.last_contact_id = self
            .last_contact_id
            .checked_add(1)
            .ok_or_else(|| StoreError::constraint("contact identifier space exhausted"))?;
        Ok(ContactId::from_raw(self.last_contact_id))
    }

    /// Allocates the next message identifier; identifiers are never reused.
    pub(crate) fn next_message_id(&mut self) -> StoreResult<MessageId> {
        self.last_message_id = self
            .last_message_id
            .checked_add(1)
            .ok_or_else(|| StoreError::constraint("message identifier space exhausted"))?;
        Ok(MessageId::from_raw(self.last_message_id))
    }
}

/// Thread-safe in-memory database shared by the contact and message stores.
///
/// # Example
///
/// ```
/// use hangouts::contact::adapters::memory::InMemoryContactStore;
/// use hangouts::message::adapters::memory::InMemoryMessageStore;
/// use hangouts::storage::InMemoryDatabase;
///
/// let database = InMemoryDatabase::new();
/// let contacts = InMemoryContactStore::new(database.clone());
/// let messages = InMemoryMessageStore::new(database);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
    contact_changes: ChangeNotifier,
    message_changes: ChangeNotifier,
}

impl InMemoryDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored contacts, or `0` if the lock is poisoned.
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.tables.read().map(|guard| guard.contacts.len()).unwrap_or(0)
    }

    /// Returns the number of stored messages, or `0` if the lock is poisoned.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.tables.read().map(|guard| guard.messages.len()).unwrap_or(0)
    }

    pub(crate) fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| StoreError::connection(format!("lock poisoned: {e}")))
    }

    pub(crate) fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| StoreError::connection(format!("lock poisoned: {e}")))
    }

    pub(crate) const fn contact_changes(&self) -> &ChangeNotifier {
        &self.contact_changes
    }

    pub(crate) const fn message_changes(&self) -> &ChangeNotifier {
        &self.message_changes
    }
}

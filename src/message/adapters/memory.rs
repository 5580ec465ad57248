//! In-memory implementation of the `MessageStore` port.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::contact::domain::ContactId;
use crate::message::{
    domain::{Message, MessageId, NewMessage},
    ports::MessageStore,
};
use crate::storage::{InMemoryDatabase, StoreError, StoreResult};

/// In-memory message store over a shared [`InMemoryDatabase`].
///
/// Enforces the contact foreign key the same way the `SQLite` schema does.
#[derive(Debug, Clone)]
pub struct InMemoryMessageStore {
    database: InMemoryDatabase,
}

impl InMemoryMessageStore {
    /// Creates a store over `database`.
    #[must_use]
    pub const fn new(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, message: &NewMessage) -> StoreResult<MessageId> {
        let id = {
            let mut tables = self.database.write()?;
            if !tables.contacts.contains_key(&message.contact_id) {
                return Err(StoreError::constraint(format!(
                    "FOREIGN KEY constraint failed: contact {} does not exist",
                    message.contact_id
                )));
            }
            let assigned = tables.next_message_id()?;
            tables.messages.insert(assigned, message.clone());
            assigned
        };
        self.database.message_changes().notify();
        Ok(id)
    }

    async fn find_for_contact(&self, contact_id: ContactId) -> StoreResult<Vec<Message>> {
        let tables = self.database.read()?;
        let mut messages: Vec<Message> = tables
            .messages
            .iter()
            .filter(|(_, message)| message.contact_id == contact_id)
            .map(|(id, message)| Message::from_persisted(*id, message.clone()))
            .collect();
        // Stable sort over id-ordered input keeps insertion order for equal
        // timestamps.
        messages.sort_by_key(Message::timestamp);
        Ok(messages)
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.database.message_changes().subscribe()
    }
}

impl From<InMemoryDatabase> for InMemoryMessageStore {
    fn from(database: InMemoryDatabase) -> Self {
        Self::new(database)
    }
}

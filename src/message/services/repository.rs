//! Repository façade over a [`MessageStore`].

use std::sync::Arc;

use crate::contact::domain::ContactId;
use crate::error::{RepositoryOperation, RepositoryResult, StoreResultExt};
use crate::message::{
    domain::{Message, MessageId, NewMessage},
    ports::MessageStore,
};
use crate::storage::{LiveQuery, live_query};

/// Public entry point for conversation reads and appends.
#[derive(Debug)]
pub struct MessageRepository<S>
where
    S: MessageStore + 'static,
{
    store: Arc<S>,
}

impl<S> Clone for MessageRepository<S>
where
    S: MessageStore + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> MessageRepository<S>
where
    S: MessageStore + 'static,
{
    /// Creates a repository over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Appends a message to its contact's conversation.
    ///
    /// # Errors
    ///
    /// Returns a repository error for [`RepositoryOperation::AddMessage`],
    /// including when the owning contact does not exist.
    pub async fn add_message(&self, message: &NewMessage) -> RepositoryResult<MessageId> {
        let id = self
            .store
            .insert(message)
            .await
            .during(RepositoryOperation::AddMessage)?;
        tracing::debug!(
            message_id = %id,
            contact_id = %message.contact_id,
            direction = message.direction.as_str(),
            "message added"
        );
        Ok(id)
    }

    /// Returns a live view of one contact's conversation in timestamp order.
    #[must_use]
    pub fn get_messages_for_contact(
        &self,
        contact_id: ContactId,
    ) -> LiveQuery<RepositoryResult<Vec<Message>>> {
        let store = Arc::clone(&self.store);
        live_query(self.store.changes(), move || {
            let snapshot_store = Arc::clone(&store);
            async move {
                snapshot_store
                    .find_for_contact(contact_id)
                    .await
                    .during(RepositoryOperation::ListMessages)
            }
        })
    }

    /// Returns one contact's conversation in timestamp order, once.
    ///
    /// # Errors
    ///
    /// Returns a repository error for [`RepositoryOperation::ListMessages`].
    pub async fn list_messages_for_contact(
        &self,
        contact_id: ContactId,
    ) -> RepositoryResult<Vec<Message>> {
        self.store
            .find_for_contact(contact_id)
            .await
            .during(RepositoryOperation::ListMessages)
    }
}

//! Repository façade over a [`ContactStore`].

use std::sync::Arc;

use crate::contact::{
    domain::{Contact, ContactDetails, ContactId},
    ports::ContactStore,
};
use crate::error::{RepositoryOperation, RepositoryResult, StoreResultExt};
use crate::storage::{LiveQuery, live_query};

/// Public entry point for contact reads and writes.
///
/// Every store failure is re-signalled as a
/// [`RepositoryError`](crate::error::RepositoryError) naming the operation.
/// No business validation happens here; callers validate input through
/// [`ContactForm`](crate::contact::domain::ContactForm) first.
#[derive(Debug)]
pub struct ContactRepository<S>
where
    S: ContactStore + 'static,
{
    store: Arc<S>,
}

impl<S> Clone for ContactRepository<S>
where
    S: ContactStore + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> ContactRepository<S>
where
    S: ContactStore + 'static,
{
    /// Creates a repository over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persists a new contact and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns a repository error for [`RepositoryOperation::AddContact`] when
    /// the store rejects the row. Nothing is persisted in that case.
    pub async fn add(&self, details: &ContactDetails) -> RepositoryResult<ContactId> {
        let id = self
            .store
            .insert(details)
            .await
            .during(RepositoryOperation::AddContact)?;
        tracing::debug!(contact_id = %id, "contact added");
        Ok(id)
    }

    /// Replaces every field of an existing contact.
    ///
    /// Updating a contact that no longer exists succeeds without effect.
    ///
    /// # Errors
    ///
    /// Returns a repository error for [`RepositoryOperation::UpdateContact`].
    pub async fn update(&self, contact: &Contact) -> RepositoryResult<()> {
        let updated = self
            .store
            .update(contact)
            .await
            .during(RepositoryOperation::UpdateContact)?;
        if !updated {
            tracing::debug!(contact_id = %contact.id(), "update matched no contact");
        }
        Ok(())
    }

    /// Deletes a contact together with its conversation.
    ///
    /// Deleting twice is a no-op the second time.
    ///
    /// # Errors
    ///
    /// Returns a repository error for [`RepositoryOperation::DeleteContact`].
    pub async fn delete(&self, contact: &Contact) -> RepositoryResult<()> {
        let deleted = self
            .store
            .delete(contact.id())
            .await
            .during(RepositoryOperation::DeleteContact)?;
        if !deleted {
            tracing::debug!(contact_id = %contact.id(), "delete matched no contact");
        }
        Ok(())
    }

    /// Returns a live view of every contact ordered by name.
    ///
    /// The stream yields the current list first and a fresh list after each
    /// change to the contact table. A failed read is emitted in place of that
    /// snapshot and the stream carries on.
    #[must_use]
    pub fn get_all(&self) -> LiveQuery<RepositoryResult<Vec<Contact>>> {
        let store = Arc::clone(&self.store);
        live_query(self.store.changes(), move || {
            let snapshot_store = Arc::clone(&store);
            async move {
                snapshot_store
                    .find_all()
                    .await
                    .during(RepositoryOperation::ListContacts)
            }
        })
    }

    /// Returns every contact ordered by name, once.
    ///
    /// # Errors
    ///
    /// Returns a repository error for [`RepositoryOperation::ListContacts`].
    pub async fn list_all(&self) -> RepositoryResult<Vec<Contact>> {
        self.store
            .find_all()
            .await
            .during(RepositoryOperation::ListContacts)
    }

    /// Looks up a contact by exact phone number.
    ///
    /// When several contacts share the number the one created first wins.
    ///
    /// # Errors
    ///
    /// Returns a repository error for
    /// [`RepositoryOperation::FindContactByPhone`].
    pub async fn get_by_phone(&self, phone: &str) -> RepositoryResult<Option<Contact>> {
        self.store
            .find_by_phone(phone)
            .await
            .during(RepositoryOperation::FindContactByPhone)
    }

    /// Looks up a contact by identifier.
    ///
    /// # Errors
    ///
    /// Returns a repository error for [`RepositoryOperation::FindContactById`].
    pub async fn get_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>> {
        self.store
            .find_by_id(id)
            .await
            .during(RepositoryOperation::FindContactById)
    }
}

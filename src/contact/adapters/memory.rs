//! In-memory implementation of the `ContactStore` port.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::contact::{
    domain::{Contact, ContactDetails, ContactId},
    ports::ContactStore,
};
use crate::storage::{InMemoryDatabase, StoreResult};

/// In-memory contact store over a shared [`InMemoryDatabase`].
///
/// Thread-safe via the database's internal lock. Suitable for tests and
/// previews only.
#[derive(Debug, Clone)]
pub struct InMemoryContactStore {
    database: InMemoryDatabase,
}

impl InMemoryContactStore {
    /// Creates a store over `database`.
    #[must_use]
    pub const fn new(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn insert(&self, details: &ContactDetails) -> StoreResult<ContactId> {
        let id = {
            let mut tables = self.database.write()?;
            let assigned = tables.next_contact_id()?;
            tables.contacts.insert(assigned, details.clone());
            assigned
        };
        self.database.contact_changes().notify();
        Ok(id)
    }

    async fn update(&self, contact: &Contact) -> StoreResult<bool> {
        let updated = {
            let mut tables = self.database.write()?;
            match tables.contacts.get_mut(&contact.id()) {
                Some(row) => {
                    *row = contact.details().clone();
                    true
                }
                None => false,
            }
        };
        if updated {
            self.database.contact_changes().notify();
        }
        Ok(updated)
    }

    async fn delete(&self, id: ContactId) -> StoreResult<bool> {
        let (deleted, cascaded) = {
            let mut tables = self.database.write()?;
            let removed = tables.contacts.remove(&id).is_some();
            let before = tables.messages.len();
            if removed {
                tables.messages.retain(|_, message| message.contact_id != id);
            }
            (removed, tables.messages.len() != before)
        };
        if deleted {
            self.database.contact_changes().notify();
        }
        if cascaded {
            self.database.message_changes().notify();
        }
        Ok(deleted)
    }

    async fn find_all(&self) -> StoreResult<Vec<Contact>> {
        let tables = self.database.read()?;
        let mut contacts: Vec<Contact> = tables
            .contacts
            .iter()
            .map(|(id, details)| Contact::from_persisted(*id, details.clone()))
            .collect();
        // BTreeMap iteration is already in id order, so a stable sort keeps
        // id as the tie-break.
        contacts.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(contacts)
    }

    async fn find_by_phone(&self, phone: &str) -> StoreResult<Option<Contact>> {
        let tables = self.database.read()?;
        Ok(tables
            .contacts
            .iter()
            .find(|(_, details)| details.phone == phone)
            .map(|(id, details)| Contact::from_persisted(*id, details.clone())))
    }

    async fn find_by_id(&self, id: ContactId) -> StoreResult<Option<Contact>> {
        let tables = self.database.read()?;
        Ok(tables
            .contacts
            .get(&id)
            .map(|details| Contact::from_persisted(id, details.clone())))
    }

    fn changes(&self) -> watch::Receiver<u64> {
        self.database.contact_changes().subscribe()
    }
}

impl From<InMemoryDatabase> for InMemoryContactStore {
    fn from(database: InMemoryDatabase) -> Self {
        Self::new(database)
    }
}

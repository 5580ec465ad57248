//! Shared world state for inbound SMS BDD scenarios.

use std::sync::Arc;

use hangouts::contact::{
    adapters::memory::InMemoryContactStore, domain::Contact, services::ContactRepository,
};
use hangouts::inbound::{InboundDispatcher, InboundMessageMatcher, InboundSms};
use hangouts::message::{
    adapters::memory::InMemoryMessageStore, domain::Message, services::MessageRepository,
};
use hangouts::storage::InMemoryDatabase;
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for inbound SMS behaviour tests.
pub struct InboundWorld {
    /// Tables shared by both repositories.
    pub database: InMemoryDatabase,
    /// Contact repository under test.
    pub contacts: ContactRepository<InMemoryContactStore>,
    /// Message repository under test.
    pub messages: MessageRepository<InMemoryMessageStore>,
}

impl InboundWorld {
    /// Creates a world over an empty in-memory database.
    #[must_use]
    pub fn new() -> Self {
        let database = InMemoryDatabase::new();
        Self {
            contacts: ContactRepository::new(Arc::new(InMemoryContactStore::new(
                database.clone(),
            ))),
            messages: MessageRepository::new(Arc::new(InMemoryMessageStore::new(
                database.clone(),
            ))),
            database,
        }
    }

    /// Delivers events through a dispatcher and waits until all are filed.
    ///
    /// # Errors
    ///
    /// Returns an error if the dispatcher stops early.
    pub fn deliver(&self, events: Vec<InboundSms>) -> Result<(), eyre::Report> {
        let matcher = InboundMessageMatcher::new(
            self.contacts.clone(),
            self.messages.clone(),
            Arc::new(DefaultClock),
        );
        run_async(async move {
            let (sender, dispatcher) = InboundDispatcher::spawn(matcher, 4);
            for event in events {
                sender.send(event).await?;
            }
            drop(sender);
            dispatcher.await?;
            Ok::<(), eyre::Report>(())
        })
    }

    /// Returns every contact with exactly this phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the contact list cannot be read.
    pub fn contacts_with_phone(&self, phone: &str) -> Result<Vec<Contact>, eyre::Report> {
        let all = run_async(self.contacts.list_all())?;
        Ok(all
            .into_iter()
            .filter(|contact| contact.phone() == phone)
            .collect())
    }

    /// Returns the conversation with the contact owning `phone`.
    ///
    /// # Errors
    ///
    /// Returns an error if no contact has the number or a read fails.
    pub fn conversation_with(&self, phone: &str) -> Result<Vec<Message>, eyre::Report> {
        let contact = run_async(self.contacts.get_by_phone(phone))?
            .ok_or_else(|| eyre::eyre!("no contact with phone {phone}"))?;
        Ok(run_async(
            self.messages.list_messages_for_contact(contact.id()),
        )?)
    }
}

impl Default for InboundWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> InboundWorld {
    InboundWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

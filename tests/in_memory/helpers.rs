//! Shared test helpers for in-memory store integration tests.

use std::io;
use std::sync::Arc;

use hangouts::contact::{
    adapters::memory::InMemoryContactStore,
    domain::{ContactDetails, ContactId, ContactName},
    services::ContactRepository,
};
use hangouts::message::{
    adapters::memory::InMemoryMessageStore,
    domain::{Direction, MessageBody, NewMessage, Timestamp},
    services::MessageRepository,
};
use hangouts::storage::InMemoryDatabase;
use rstest::fixture;
use tokio::runtime::Runtime;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Both repositories over one shared in-memory database.
pub struct Stores {
    pub database: InMemoryDatabase,
    pub contacts: ContactRepository<InMemoryContactStore>,
    pub messages: MessageRepository<InMemoryMessageStore>,
}

/// Provides fresh repositories for each test.
#[fixture]
pub fn stores() -> Stores {
    let database = InMemoryDatabase::new();
    Stores {
        contacts: ContactRepository::new(Arc::new(InMemoryContactStore::new(database.clone()))),
        messages: MessageRepository::new(Arc::new(InMemoryMessageStore::new(database.clone()))),
        database,
    }
}

/// Builds contact details with only the required fields.
///
/// # Panics
///
/// Panics if `name` is blank.
pub fn details(name: &str, phone: &str) -> ContactDetails {
    ContactDetails::new(ContactName::new(name).expect("valid contact name"), phone)
}

/// Builds an unsaved message at a fixed time.
///
/// # Panics
///
/// Panics if `text` is blank.
pub fn message_at(
    contact_id: ContactId,
    text: &str,
    millis: i64,
    direction: Direction,
) -> NewMessage {
    NewMessage::new(
        contact_id,
        MessageBody::new(text).expect("valid message body"),
        Timestamp::from_millis(millis),
        direction,
    )
}

//! Referential integrity against a `SQLite` file.

use crate::sqlite::helpers::{TestDatabase, database, details, message_at};
use futures::StreamExt;
use hangouts::contact::domain::ContactId;
use hangouts::error::RepositoryOperation;
use hangouts::message::domain::Direction;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_contact_deletes_its_messages(
    database: eyre::Result<TestDatabase>,
) -> eyre::Result<()> {
    let db = database?;
    let ada = db.contacts.add(&details("Ada", "5550001")?).await?;
    let bob = db.contacts.add(&details("Bob", "5550002")?).await?;
    db.messages
        .add_message(&message_at(ada, "to ada", 1, Direction::Outbound)?)
        .await?;
    db.messages
        .add_message(&message_at(bob, "to bob", 2, Direction::Outbound)?)
        .await?;
    let contact = db
        .contacts
        .get_by_id(ada)
        .await?
        .ok_or_else(|| eyre::eyre!("contact {ada} not found"))?;

    db.contacts.delete(&contact).await?;

    assert!(db.messages.list_messages_for_contact(ada).await?.is_empty());
    assert_eq!(db.messages.list_messages_for_contact(bob).await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn message_for_missing_contact_is_rejected(
    database: eyre::Result<TestDatabase>,
) -> eyre::Result<()> {
    let db = database?;
    let orphan = message_at(ContactId::from_raw(404), "hello?", 1, Direction::Outbound)?;

    let err = db
        .messages
        .add_message(&orphan)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("orphan message was accepted"))?;

    assert_eq!(err.operation(), RepositoryOperation::AddMessage);
    assert!(err.cause().is_constraint(), "unexpected cause: {}", err.cause());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_conversation_sees_cascade(database: eyre::Result<TestDatabase>) -> eyre::Result<()> {
    let db = database?;
    let ada = db.contacts.add(&details("Ada", "5550001")?).await?;
    db.messages
        .add_message(&message_at(ada, "hello", 1, Direction::Inbound)?)
        .await?;
    let mut live = db.messages.get_messages_for_contact(ada);
    let initial = live
        .next()
        .await
        .ok_or_else(|| eyre::eyre!("stream ended"))??;
    assert_eq!(initial.len(), 1);

    let contact = db
        .contacts
        .get_by_id(ada)
        .await?
        .ok_or_else(|| eyre::eyre!("contact {ada} not found"))?;
    db.contacts.delete(&contact).await?;

    let after = live
        .next()
        .await
        .ok_or_else(|| eyre::eyre!("stream ended"))??;
    assert!(after.is_empty());
    Ok(())
}

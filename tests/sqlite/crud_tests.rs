//! Round-trip and write semantics against a `SQLite` file.

use crate::sqlite::helpers::{TestDatabase, database, details, message_at};
use hangouts::message::domain::Direction;
use hangouts::storage::sqlite::migrations;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn contact_with_every_field_round_trips(database: eyre::Result<TestDatabase>) -> eyre::Result<()> {
    let db = database?;
    let original = details("Ada Lovelace", "5550001")?
        .with_email("ada@example.com")
        .with_address("12 Analytical Row")
        .with_notes("first programmer")
        .with_avatar_path("/data/avatars/ada.png");

    let id = db.contacts.add(&original).await?;
    let fetched = db
        .contacts
        .get_by_id(id)
        .await?
        .ok_or_else(|| eyre::eyre!("contact {id} not found"))?;

    assert_eq!(fetched.id(), id);
    assert_eq!(fetched.details(), &original);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_and_clears_fields(database: eyre::Result<TestDatabase>) -> eyre::Result<()> {
    let db = database?;
    let id = db
        .contacts
        .add(&details("Grace", "5550100")?.with_email("old@example.com"))
        .await?;
    let stored = db
        .contacts
        .get_by_id(id)
        .await?
        .ok_or_else(|| eyre::eyre!("contact {id} not found"))?;

    let replacement = details("Grace Hopper", "5550101")?.with_notes("COBOL");
    db.contacts
        .update(&stored.with_details(replacement.clone()))
        .await?;

    let updated = db
        .contacts
        .get_by_id(id)
        .await?
        .ok_or_else(|| eyre::eyre!("contact {id} not found"))?;
    assert_eq!(updated.details(), &replacement);
    assert_eq!(updated.email(), None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_twice_is_a_no_op(database: eyre::Result<TestDatabase>) -> eyre::Result<()> {
    let db = database?;
    let id = db.contacts.add(&details("Ada", "5550001")?).await?;
    let contact = db
        .contacts
        .get_by_id(id)
        .await?
        .ok_or_else(|| eyre::eyre!("contact {id} not found"))?;

    db.contacts.delete(&contact).await?;
    db.contacts.delete(&contact).await?;
    db.contacts.update(&contact).await?;

    assert_eq!(db.contacts.get_by_id(id).await?, None);
    assert!(db.contacts.list_all().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn identifiers_are_not_reused(database: eyre::Result<TestDatabase>) -> eyre::Result<()> {
    let db = database?;
    let first = db.contacts.add(&details("Ada", "5550001")?).await?;
    let contact = db
        .contacts
        .get_by_id(first)
        .await?
        .ok_or_else(|| eyre::eyre!("contact {first} not found"))?;
    db.contacts.delete(&contact).await?;

    let second = db.contacts.add(&details("Bob", "5550002")?).await?;

    assert!(second > first);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn data_survives_reopening_the_file(database: eyre::Result<TestDatabase>) -> eyre::Result<()> {
    let db = database?;
    let ada = db.contacts.add(&details("Ada", "5550001")?).await?;
    db.messages
        .add_message(&message_at(ada, "persisted", 42, Direction::Outbound)?)
        .await?;

    let reopened = db.reopen()?;

    let contact = reopened.contacts.get_by_phone("5550001").await?;
    assert_eq!(contact.map(|c| c.id()), Some(ada));
    let thread = reopened.messages.list_messages_for_contact(ada).await?;
    assert_eq!(thread.len(), 1);
    Ok(())
}

#[rstest]
fn schema_is_at_latest_version(database: eyre::Result<TestDatabase>) -> eyre::Result<()> {
    let db = database?;
    let mut conn = db.database.pool().get()?;

    assert_eq!(migrations::schema_version(&mut conn)?, migrations::latest_version());
    Ok(())
}

#[rstest]
fn database_file_lives_in_data_dir(database: eyre::Result<TestDatabase>) -> eyre::Result<()> {
    let db = database?;
    let path = db.config.database_path();

    assert!(path.starts_with(db.dir.path()));
    assert!(path.exists());
    Ok(())
}

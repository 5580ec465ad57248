//! Ordering guarantees against a `SQLite` file.

use crate::sqlite::helpers::{TestDatabase, database, details, message_at};
use hangouts::message::domain::{Direction, MessageId};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn contacts_are_listed_by_name(database: eyre::Result<TestDatabase>) -> eyre::Result<()> {
    let db = database?;
    for (name, phone) in [("Zed", "1"), ("amy", "2"), ("Amy", "3"), ("Bob", "4")] {
        db.contacts.add(&details(name, phone)?).await?;
    }

    let names: Vec<String> = db
        .contacts
        .list_all()
        .await?
        .iter()
        .map(|contact| contact.name().as_str().to_owned())
        .collect();

    // Binary collation: upper case sorts before lower case.
    assert_eq!(names, ["Amy", "Bob", "Zed", "amy"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn messages_sort_by_timestamp_then_insertion(
    database: eyre::Result<TestDatabase>,
) -> eyre::Result<()> {
    let db = database?;
    let ada = db.contacts.add(&details("Ada", "5550001")?).await?;

    let late = db
        .messages
        .add_message(&message_at(ada, "late", 900, Direction::Inbound)?)
        .await?;
    let tie_first = db
        .messages
        .add_message(&message_at(ada, "tie one", 100, Direction::Outbound)?)
        .await?;
    let tie_second = db
        .messages
        .add_message(&message_at(ada, "tie two", 100, Direction::Inbound)?)
        .await?;
    let middle = db
        .messages
        .add_message(&message_at(ada, "middle", 500, Direction::Outbound)?)
        .await?;

    let ids: Vec<MessageId> = db
        .messages
        .list_messages_for_contact(ada)
        .await?
        .iter()
        .map(|message| message.id())
        .collect();

    assert_eq!(ids, [tie_first, tie_second, middle, late]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn direction_survives_storage(database: eyre::Result<TestDatabase>) -> eyre::Result<()> {
    let db = database?;
    let ada = db.contacts.add(&details("Ada", "5550001")?).await?;
    db.messages
        .add_message(&message_at(ada, "sent", 1, Direction::Outbound)?)
        .await?;
    db.messages
        .add_message(&message_at(ada, "received", 2, Direction::Inbound)?)
        .await?;

    let directions: Vec<Direction> = db
        .messages
        .list_messages_for_contact(ada)
        .await?
        .iter()
        .map(|message| message.direction())
        .collect();

    assert_eq!(directions, [Direction::Outbound, Direction::Inbound]);
    Ok(())
}

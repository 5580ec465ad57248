//! Conversation ordering and isolation over the in-memory store.

use crate::in_memory::helpers::{Stores, details, message_at, runtime, stores};
use hangouts::contact::domain::ContactId;
use hangouts::error::RepositoryOperation;
use hangouts::message::domain::{Direction, MessageId};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn bodies(stores: &Stores, rt: &Runtime, contact: ContactId) -> Vec<String> {
    rt.block_on(stores.messages.list_messages_for_contact(contact))
        .expect("list messages")
        .iter()
        .map(|message| message.body().as_str().to_owned())
        .collect()
}

/// Tests that messages come back by timestamp regardless of insert order.
#[rstest]
fn messages_are_ordered_by_timestamp(runtime: io::Result<Runtime>, stores: Stores) {
    let rt = runtime.expect("runtime creation");
    let ada = rt.block_on(stores.contacts.add(&details("Ada", "5550001"))).expect("add");
    for (text, millis) in [("third", 300), ("first", 100), ("second", 200)] {
        rt.block_on(
            stores
                .messages
                .add_message(&message_at(ada, text, millis, Direction::Inbound)),
        )
        .expect("append");
    }

    assert_eq!(bodies(&stores, &rt, ada), ["first", "second", "third"]);
}

/// Tests that equal timestamps keep insertion order.
#[rstest]
fn equal_timestamps_keep_insertion_order(runtime: io::Result<Runtime>, stores: Stores) {
    let rt = runtime.expect("runtime creation");
    let ada = rt.block_on(stores.contacts.add(&details("Ada", "5550001"))).expect("add");
    let mut ids: Vec<MessageId> = Vec::new();
    for (text, direction) in [
        ("a", Direction::Inbound),
        ("b", Direction::Outbound),
        ("c", Direction::Inbound),
    ] {
        let id = rt
            .block_on(
                stores
                    .messages
                    .add_message(&message_at(ada, text, 500, direction)),
            )
            .expect("append");
        ids.push(id);
    }

    let listed: Vec<MessageId> = rt
        .block_on(stores.messages.list_messages_for_contact(ada))
        .expect("list")
        .iter()
        .map(|message| message.id())
        .collect();
    assert_eq!(listed, ids);
    assert_eq!(bodies(&stores, &rt, ada), ["a", "b", "c"]);
}

/// Tests that a conversation only holds its own contact's messages.
#[rstest]
fn conversations_are_isolated_per_contact(runtime: io::Result<Runtime>, stores: Stores) {
    let rt = runtime.expect("runtime creation");
    let ada = rt.block_on(stores.contacts.add(&details("Ada", "5550001"))).expect("add");
    let bob = rt.block_on(stores.contacts.add(&details("Bob", "5550002"))).expect("add");
    rt.block_on(
        stores
            .messages
            .add_message(&message_at(ada, "for ada", 1, Direction::Outbound)),
    )
    .expect("append");
    rt.block_on(
        stores
            .messages
            .add_message(&message_at(bob, "for bob", 2, Direction::Outbound)),
    )
    .expect("append");

    assert_eq!(bodies(&stores, &rt, ada), ["for ada"]);
    assert_eq!(bodies(&stores, &rt, bob), ["for bob"]);
    assert!(bodies(&stores, &rt, ContactId::from_raw(404)).is_empty());
}

/// Tests that a message for an unknown contact is rejected and not stored.
#[rstest]
fn message_for_unknown_contact_is_rejected(runtime: io::Result<Runtime>, stores: Stores) {
    let rt = runtime.expect("runtime creation");
    let orphan = message_at(ContactId::from_raw(99), "hello?", 1, Direction::Outbound);

    let err = rt
        .block_on(stores.messages.add_message(&orphan))
        .expect_err("unknown contact");

    assert_eq!(err.operation(), RepositoryOperation::AddMessage);
    assert!(err.cause().is_constraint());
    assert_eq!(stores.database.message_count(), 0);
}

//! Inbound SMS filing through the dispatcher over the in-memory store.

use std::sync::Arc;

use crate::in_memory::helpers::{Stores, details, runtime, stores};
use hangouts::inbound::{AUTO_CREATED_NOTE, InboundDispatcher, InboundMessageMatcher, InboundSms};
use hangouts::message::domain::Direction;
use mockable::DefaultClock;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn deliver_all(rt: &Runtime, stores: &Stores, events: Vec<InboundSms>) {
    let matcher = InboundMessageMatcher::new(
        stores.contacts.clone(),
        stores.messages.clone(),
        Arc::new(DefaultClock),
    );
    rt.block_on(async {
        let (sender, dispatcher) = InboundDispatcher::spawn(matcher, 4);
        for event in events {
            sender.send(event).await.expect("dispatcher accepts event");
        }
        drop(sender);
        dispatcher.await.expect("dispatcher finishes");
    });
}

/// Tests that an unknown sender yields exactly one new contact and message.
#[rstest]
fn unknown_sender_is_auto_created(runtime: io::Result<Runtime>, stores: Stores) {
    let rt = runtime.expect("runtime creation");

    deliver_all(&rt, &stores, vec![InboundSms::new("+15551234", "hello")]);

    let contacts = rt.block_on(stores.contacts.list_all()).expect("list");
    assert_eq!(contacts.len(), 1);
    let contact = contacts.first().expect("created contact");
    assert_eq!(contact.phone(), "+15551234");
    assert_eq!(contact.notes(), Some(AUTO_CREATED_NOTE));

    let thread = rt
        .block_on(stores.messages.list_messages_for_contact(contact.id()))
        .expect("list");
    assert_eq!(thread.len(), 1);
    let message = thread.first().expect("filed message");
    assert_eq!(message.body().as_str(), "hello");
    assert_eq!(message.direction(), Direction::Inbound);
}

/// Tests that a known sender's message joins the existing thread.
#[rstest]
fn known_sender_is_matched(runtime: io::Result<Runtime>, stores: Stores) {
    let rt = runtime.expect("runtime creation");
    let ada = rt
        .block_on(stores.contacts.add(&details("Ada", "+15551234")))
        .expect("add");

    deliver_all(
        &rt,
        &stores,
        vec![
            InboundSms::new("+15551234", "one"),
            InboundSms::new("+15551234", "two"),
        ],
    );

    assert_eq!(stores.database.contact_count(), 1);
    let thread = rt
        .block_on(stores.messages.list_messages_for_contact(ada))
        .expect("list");
    let texts: Vec<&str> = thread.iter().map(|m| m.body().as_str()).collect();
    assert_eq!(texts, ["one", "two"]);
}

/// Tests that bad events are skipped while later events still land.
#[rstest]
fn dropped_events_do_not_block_the_queue(runtime: io::Result<Runtime>, stores: Stores) {
    let rt = runtime.expect("runtime creation");

    deliver_all(
        &rt,
        &stores,
        vec![
            InboundSms::new("", "no sender"),
            InboundSms::new("5550100", ""),
            InboundSms::new("5550100", "kept"),
        ],
    );

    assert_eq!(stores.database.contact_count(), 1);
    assert_eq!(stores.database.message_count(), 1);
}

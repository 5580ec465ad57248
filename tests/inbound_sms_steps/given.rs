//! Given steps for inbound SMS BDD scenarios.

use super::world::{InboundWorld, run_async};
use eyre::WrapErr;
use hangouts::contact::domain::{ContactDetails, ContactName};
use hangouts::message::domain::{MessageBody, NewMessage};
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given(r#"no contact has the phone number "{phone}""#)]
fn no_contact_with_phone(world: &mut InboundWorld, phone: String) -> Result<(), eyre::Report> {
    if run_async(world.contacts.get_by_phone(&phone))?.is_some() {
        return Err(eyre::eyre!("expected no contact with phone {phone}"));
    }
    Ok(())
}

#[given(r#"a contact "{name}" with the phone number "{phone}""#)]
fn contact_with_phone(
    world: &mut InboundWorld,
    name: String,
    phone: String,
) -> Result<(), eyre::Report> {
    let details = ContactDetails::new(ContactName::new(name)?, phone);
    run_async(world.contacts.add(&details)).wrap_err("add scenario contact")?;
    Ok(())
}

#[given(r#"an outbound message "{text}" to "{phone}""#)]
fn outbound_message(world: &mut InboundWorld, text: String, phone: String) -> Result<(), eyre::Report> {
    let contact = run_async(world.contacts.get_by_phone(&phone))?
        .ok_or_else(|| eyre::eyre!("no contact with phone {phone}"))?;
    let message = NewMessage::outbound(contact.id(), MessageBody::new(text)?, &DefaultClock);
    run_async(world.messages.add_message(&message)).wrap_err("add outbound message")?;
    Ok(())
}

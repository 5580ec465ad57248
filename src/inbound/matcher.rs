//! Sender-to-contact resolution and conversation append.

use std::sync::Arc;

use mockable::Clock;

use crate::contact::{
    domain::{Contact, ContactDetails, ContactId, ContactName},
    ports::ContactStore,
    services::ContactRepository,
};
use crate::error::RepositoryResult;
use crate::inbound::InboundSms;
use crate::message::{
    domain::{MessageBody, MessageId, NewMessage},
    ports::MessageStore,
    services::MessageRepository,
};

/// Notes stored on contacts created for unknown senders.
pub const AUTO_CREATED_NOTE: &str = "Auto-created from SMS";

/// Why an inbound event was discarded without touching the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The event carried no sender address.
    MissingSender,
    /// The event carried no text.
    EmptyBody,
    /// No contact could be found for the sender, even after creating one.
    ContactUnresolved,
}

/// Result of processing one inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundOutcome {
    /// The message was appended to a contact's conversation.
    Appended {
        /// Contact the message was filed under.
        contact_id: ContactId,
        /// Identifier of the stored message.
        message_id: MessageId,
        /// Whether the contact was created for this event.
        contact_created: bool,
    },
    /// The event was discarded.
    Dropped(DropReason),
}

/// Files inbound SMS events under the matching contact.
///
/// Each event is an independent unit of work: look up the sender, create a
/// contact if none exists, then append the message. Nothing spans events and
/// no application-level lock is taken.
#[derive(Debug)]
pub struct InboundMessageMatcher<C, M, K>
where
    C: ContactStore + 'static,
    M: MessageStore + 'static,
    K: Clock + Send + Sync,
{
    contacts: ContactRepository<C>,
    messages: MessageRepository<M>,
    clock: Arc<K>,
}

impl<C, M, K> InboundMessageMatcher<C, M, K>
where
    C: ContactStore + 'static,
    M: MessageStore + 'static,
    K: Clock + Send + Sync,
{
    /// Creates a matcher writing through the given repositories.
    #[must_use]
    pub const fn new(
        contacts: ContactRepository<C>,
        messages: MessageRepository<M>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            contacts,
            messages,
            clock,
        }
    }

    /// Processes one event and reports what happened.
    ///
    /// A contact created here is named after the sender address, carries the
    /// sender as its phone number and has [`AUTO_CREATED_NOTE`] as its notes.
    /// The body is stored exactly as received; only an empty body is dropped.
    ///
    /// # Errors
    ///
    /// Returns the repository error from whichever lookup or write failed. A
    /// contact created before the failure stays in place.
    pub async fn process(&self, event: &InboundSms) -> RepositoryResult<InboundOutcome> {
        let Ok(name) = ContactName::new(event.sender.as_str()) else {
            return Ok(InboundOutcome::Dropped(DropReason::MissingSender));
        };
        let Ok(body) = MessageBody::verbatim(event.body.as_str()) else {
            return Ok(InboundOutcome::Dropped(DropReason::EmptyBody));
        };

        let (resolved, contact_created) = self.resolve_sender(&event.sender, name).await?;
        let Some(contact) = resolved else {
            return Ok(InboundOutcome::Dropped(DropReason::ContactUnresolved));
        };

        let message = NewMessage::inbound(contact.id(), body, &*self.clock);
        let message_id = self.messages.add_message(&message).await?;

        Ok(InboundOutcome::Appended {
            contact_id: contact.id(),
            message_id,
            contact_created,
        })
    }

    /// Processes one event, logging and discarding every failure.
    pub async fn deliver(&self, event: &InboundSms) {
        match self.process(event).await {
            Ok(InboundOutcome::Appended {
                contact_id,
                message_id,
                ..
            }) => {
                tracing::debug!(%contact_id, %message_id, "inbound sms filed");
            }
            Ok(InboundOutcome::Dropped(reason)) => {
                tracing::warn!(?reason, sender = %event.sender, "inbound sms dropped");
            }
            Err(error) => {
                tracing::warn!(%error, sender = %event.sender, "inbound sms dropped");
            }
        }
    }

    async fn resolve_sender(
        &self,
        sender: &str,
        name: ContactName,
    ) -> RepositoryResult<(Option<Contact>, bool)> {
        if let Some(existing) = self.contacts.get_by_phone(sender).await? {
            return Ok((Some(existing), false));
        }

        let details = ContactDetails::new(name, sender).with_notes(AUTO_CREATED_NOTE);
        let contact_id = self.contacts.add(&details).await?;
        tracing::info!(%contact_id, %sender, "created contact for unknown sender");

        // A delete racing this insert must be observed before appending.
        let refreshed = self.contacts.get_by_phone(sender).await?;
        Ok((refreshed, true))
    }
}

//! Message entity and related conversation types.

use super::{MessageBody, MessageId, ParseDirectionError, Timestamp};
use crate::contact::domain::ContactId;
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Which side of the conversation produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Sent by the user.
    Outbound,
    /// Received from the network.
    Inbound,
}

impl Direction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outbound => "outbound",
            Self::Inbound => "inbound",
        }
    }

    /// Returns `true` for messages received from the network.
    #[must_use]
    pub const fn is_inbound(self) -> bool {
        matches!(self, Self::Inbound)
    }
}

impl TryFrom<&str> for Direction {
    type Error = ParseDirectionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "outbound" => Ok(Self::Outbound),
            "inbound" => Ok(Self::Inbound),
            _ => Err(ParseDirectionError(value.to_owned())),
        }
    }
}

/// A message that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    /// Contact whose conversation the message belongs to.
    pub contact_id: ContactId,
    /// Message text.
    pub body: MessageBody,
    /// Creation time; the conversation sort key.
    pub timestamp: Timestamp,
    /// Outbound or inbound.
    pub direction: Direction,
}

impl NewMessage {
    /// Creates a message with an explicit timestamp.
    #[must_use]
    pub const fn new(
        contact_id: ContactId,
        body: MessageBody,
        timestamp: Timestamp,
        direction: Direction,
    ) -> Self {
        Self {
            contact_id,
            body,
            timestamp,
            direction,
        }
    }

    /// Creates a message the user is sending, stamped with the current time.
    #[must_use]
    pub fn outbound(contact_id: ContactId, body: MessageBody, clock: &impl Clock) -> Self {
        Self::new(contact_id, body, Timestamp::now(clock), Direction::Outbound)
    }

    /// Creates a message received from the network, stamped with the current
    /// time.
    #[must_use]
    pub fn inbound(contact_id: ContactId, body: MessageBody, clock: &impl Clock) -> Self {
        Self::new(contact_id, body, Timestamp::now(clock), Direction::Inbound)
    }
}

/// A stored, immutable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    #[serde(flatten)]
    content: NewMessage,
}

impl Message {
    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: MessageId, content: NewMessage) -> Self {
        Self { id, content }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the owning contact.
    #[must_use]
    pub const fn contact_id(&self) -> ContactId {
        self.content.contact_id
    }

    /// Returns the message text.
    #[must_use]
    pub const fn body(&self) -> &MessageBody {
        &self.content.body
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.content.timestamp
    }

    /// Returns the message direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.content.direction
    }

    /// Returns every field except the identifier.
    #[must_use]
    pub const fn content(&self) -> &NewMessage {
        &self.content
    }
}

//! Inbound SMS event payload.

use serde::{Deserialize, Serialize};

/// One decoded SMS as delivered by the platform receiver.
///
/// Fields are kept exactly as received; the matcher decides whether the event
/// is usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundSms {
    /// Originating address, matched verbatim against contact phone numbers.
    pub sender: String,
    /// Message text.
    pub body: String,
}

impl InboundSms {
    /// Creates an event from a sender address and body.
    #[must_use]
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }
}

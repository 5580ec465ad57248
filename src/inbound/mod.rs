//! Inbound SMS handling.
//!
//! An [`InboundSms`] names a sender address and a text body. The
//! [`InboundMessageMatcher`] resolves the sender to a contact, creating one
//! when the number is unknown, and appends the body to that contact's
//! conversation. The [`InboundDispatcher`] runs the matcher on a background
//! task and feeds it events strictly one at a time, in delivery order.

mod dispatcher;
mod event;
mod matcher;

pub use dispatcher::{InboundClosed, InboundDispatcher, InboundSender};
pub use event::InboundSms;
pub use matcher::{AUTO_CREATED_NOTE, DropReason, InboundMessageMatcher, InboundOutcome};

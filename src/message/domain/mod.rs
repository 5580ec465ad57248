//! Domain model for conversation messages.
//!
//! Messages belong to exactly one contact, are immutable once stored, and are
//! ordered by timestamp with the store-assigned identifier breaking ties.

mod error;
mod ids;
mod message;

pub use error::{MessageDomainError, ParseDirectionError};
pub use ids::{MessageBody, MessageId, Timestamp};
pub use message::{Direction, Message, NewMessage};

//! Identifier and scalar types for the message domain.

use super::MessageDomainError;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a message.
///
/// Identifiers increase with insertion order and break timestamp ties when
/// ordering a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    /// Wraps a raw identifier read from storage.
    #[must_use]
    pub const fn from_raw(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Reads the current time from `clock`, truncated to milliseconds.
    #[must_use]
    pub fn now(clock: &impl Clock) -> Self {
        Self(clock.utc().timestamp_millis())
    }

    /// Returns epoch milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Converts to a UTC date-time, or `None` when out of range.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty message text.
///
/// [`new`](Self::new) is for text the user typed and refuses blank input.
/// [`verbatim`](Self::verbatim) is for text received from the network or read
/// back from storage, where any non-empty content is kept as it arrived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageBody(String);

impl MessageBody {
    /// Creates a validated message body. The text is kept as given.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyBody`] when the text is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, MessageDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(MessageDomainError::EmptyBody);
        }
        Ok(Self(raw))
    }

    /// Accepts any non-empty text, including whitespace-only bodies.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyBody`] when the text is empty.
    pub fn verbatim(value: impl Into<String>) -> Result<Self, MessageDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(MessageDomainError::EmptyBody);
        }
        Ok(Self(raw))
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageBody {
    type Error = MessageDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::verbatim(value)
    }
}

impl From<MessageBody> for String {
    fn from(value: MessageBody) -> Self {
        value.0
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MessageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

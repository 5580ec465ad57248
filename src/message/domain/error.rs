//! Error types for message domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing message values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageDomainError {
    /// The message text is empty, or blank where blank text is refused.
    #[error("message text must not be empty")]
    EmptyBody,
}

/// Error returned while parsing a message direction from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown message direction: {0}")]
pub struct ParseDirectionError(pub String);

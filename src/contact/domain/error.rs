//! Error types for contact domain validation.

use thiserror::Error;

/// Errors returned while constructing contact values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactDomainError {
    /// The display name is empty after trimming.
    #[error("contact name must not be empty")]
    EmptyName,

    /// The phone number does not have between 7 and 15 digits.
    #[error("invalid phone number '{0}', expected 7 to 15 digits")]
    InvalidPhone(String),

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}

//! Identifier and validated scalar types for the contact domain.

use super::ContactDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a contact.
///
/// Identifiers are assigned on insert and never reused, even after the
/// contact is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i64);

impl ContactId {
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

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty contact display name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactName(String);

impl ContactName {
    /// Creates a validated display name.
    ///
    /// The name is stored exactly as given; only the emptiness check trims.
    ///
    /// # Errors
    ///
    /// Returns [`ContactDomainError::EmptyName`] when the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ContactDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ContactDomainError::EmptyName);
        }
        Ok(Self(raw))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContactName {
    type Error = ContactDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContactName> for String {
    fn from(value: ContactName) -> Self {
        value.0
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

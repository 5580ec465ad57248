//! Contact aggregate and its store-independent details.

use super::{ContactId, ContactName};
use serde::{Deserialize, Serialize};

/// Every contact field except the store-assigned identifier.
///
/// Used to create contacts and as the full replacement payload on update.
/// Optional fields use `None` for "not set"; an empty string is a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    /// Display name.
    pub name: ContactName,
    /// Phone number, the key used to match inbound messages.
    pub phone: String,
    /// Email address.
    pub email: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Path of the avatar image file on local disk.
    pub avatar_path: Option<String>,
}

impl ContactDetails {
    /// Creates details with a name and phone number and no optional fields.
    #[must_use]
    pub fn new(name: ContactName, phone: impl Into<String>) -> Self {
        Self {
            name,
            phone: phone.into(),
            email: None,
            address: None,
            notes: None,
            avatar_path: None,
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the avatar path.
    #[must_use]
    pub fn with_avatar_path(mut self, avatar_path: impl Into<String>) -> Self {
        self.avatar_path = Some(avatar_path.into());
        self
    }
}

/// A stored contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    id: ContactId,
    #[serde(flatten)]
    details: ContactDetails,
}

impl Contact {
    /// Reconstructs a contact from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: ContactId, details: ContactDetails) -> Self {
        Self { id, details }
    }

    /// Returns the contact identifier.
    #[must_use]
    pub const fn id(&self) -> ContactId {
        self.id
    }

    /// Returns all fields except the identifier.
    #[must_use]
    pub const fn details(&self) -> &ContactDetails {
        &self.details
    }

    /// Consumes the contact, returning its details.
    #[must_use]
    pub fn into_details(self) -> ContactDetails {
        self.details
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &ContactName {
        &self.details.name
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.details.phone
    }

    /// Returns the email address, if set.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.details.email.as_deref()
    }

    /// Returns the postal address, if set.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.details.address.as_deref()
    }

    /// Returns the notes, if set.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.details.notes.as_deref()
    }

    /// Returns the avatar path, if set.
    #[must_use]
    pub fn avatar_path(&self) -> Option<&str> {
        self.details.avatar_path.as_deref()
    }

    /// Returns a copy of this contact with every field but the identifier
    /// replaced.
    #[must_use]
    pub fn with_details(self, details: ContactDetails) -> Self {
        Self {
            id: self.id,
            details,
        }
    }
}

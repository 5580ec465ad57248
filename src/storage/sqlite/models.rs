//! Diesel row models and their conversion to domain types.
//!
//! These types are the boundary between the database and the domain layers;
//! every conversion failure becomes a [`StoreError::Serialization`].

use diesel::prelude::*;

use super::schema::{contacts, messages};
use crate::contact::domain::{Contact, ContactDetails, ContactId, ContactName};
use crate::message::domain::{Direction, Message, MessageBody, MessageId, NewMessage, Timestamp};
use crate::storage::{StoreError, StoreResult};

// ============================================================================
// Contact Models
// ============================================================================

/// Database row representation of a contact.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ContactRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Optional avatar file path.
    pub avatar_path: Option<String>,
}

impl ContactRow {
    /// Converts the row into a domain contact.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the stored name is empty.
    pub fn into_domain(self) -> StoreResult<Contact> {
        let name = ContactName::new(self.name).map_err(ser_err)?;
        Ok(Contact::from_persisted(
            ContactId::from_raw(self.id),
            ContactDetails {
                name,
                phone: self.phone,
                email: self.email,
                address: self.address,
                notes: self.notes,
                avatar_path: self.avatar_path,
            },
        ))
    }
}

/// Insert and full-replace payload for contact rows.
///
/// `treat_none_as_null` makes an update clear optional columns that are
/// `None` instead of leaving them untouched.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(treat_none_as_null = true)]
pub struct ContactValues {
    /// Display name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Optional avatar file path.
    pub avatar_path: Option<String>,
}

impl From<&ContactDetails> for ContactValues {
    fn from(details: &ContactDetails) -> Self {
        Self {
            name: details.name.as_str().to_owned(),
            phone: details.phone.clone(),
            email: details.email.clone(),
            address: details.address.clone(),
            notes: details.notes.clone(),
            avatar_path: details.avatar_path.clone(),
        }
    }
}

// ============================================================================
// Message Models
// ============================================================================

/// Database row representation of a message.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MessageRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Owning contact.
    pub contact_id: i64,
    /// Message text.
    pub body: String,
    /// Creation time in epoch milliseconds.
    pub timestamp_ms: i64,
    /// `inbound` or `outbound`.
    pub direction: String,
}

impl MessageRow {
    /// Converts the row into a domain message.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the body is empty or the
    /// direction tag is unknown.
    pub fn into_domain(self) -> StoreResult<Message> {
        let direction = Direction::try_from(self.direction.as_str()).map_err(ser_err)?;
        let body = MessageBody::verbatim(self.body).map_err(ser_err)?;
        Ok(Message::from_persisted(
            MessageId::from_raw(self.id),
            NewMessage::new(
                ContactId::from_raw(self.contact_id),
                body,
                Timestamp::from_millis(self.timestamp_ms),
                direction,
            ),
        ))
    }
}

/// Data for inserting a new message.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessageRow {
    /// Owning contact.
    pub contact_id: i64,
    /// Message text.
    pub body: String,
    /// Creation time in epoch milliseconds.
    pub timestamp_ms: i64,
    /// `inbound` or `outbound`.
    pub direction: &'static str,
}

impl From<&NewMessage> for NewMessageRow {
    fn from(message: &NewMessage) -> Self {
        Self {
            contact_id: message.contact_id.into_inner(),
            body: message.body.as_str().to_owned(),
            timestamp_ms: message.timestamp.as_millis(),
            direction: message.direction.as_str(),
        }
    }
}

fn ser_err(err: impl std::fmt::Display) -> StoreError {
    StoreError::serialization(err.to_string())
}

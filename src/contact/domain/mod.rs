//! Domain model for contacts.
//!
//! Contacts carry a display name, a phone number used to match inbound
//! messages, and optional metadata. Identifiers are assigned by the store.

mod contact;
mod error;
mod ids;
mod input;

pub use contact::{Contact, ContactDetails};
pub use error::ContactDomainError;
pub use ids::{ContactId, ContactName};
pub use input::{ContactForm, is_valid_email, is_valid_phone, normalize_phone};

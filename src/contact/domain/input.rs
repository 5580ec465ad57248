//! Caller-side helpers for turning raw form input into contact details.
//!
//! Repositories store whatever they are given; these checks belong to the
//! code collecting user input before it calls `add` or `update`.

use std::sync::LazyLock;

use regex::Regex;

use super::{ContactDetails, ContactDomainError, ContactName};

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// Strips every non-digit character from a phone number.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Returns `true` when the phone number has 7 to 15 digits, ignoring
/// separators and a leading `+`.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Returns `true` for a blank value or a plausible `local@domain.tld`
/// address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return true;
    }
    EMAIL.as_ref().is_some_and(|pattern| pattern.is_match(trimmed))
}

/// Raw text fields from a contact edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Name as typed.
    pub name: String,
    /// Phone number as typed.
    pub phone: String,
    /// Email as typed; blank means not set.
    pub email: String,
    /// Address as typed; blank means not set.
    pub address: String,
    /// Notes as typed; blank means not set.
    pub notes: String,
    /// Avatar path chosen by the image picker.
    pub avatar_path: Option<String>,
}

impl ContactForm {
    /// Validates the form and produces contact details.
    ///
    /// Text fields are trimmed, blank optional fields become `None`, and the
    /// phone number is reduced to its digits.
    ///
    /// # Errors
    ///
    /// Returns [`ContactDomainError`] when the name is blank, the phone number
    /// has the wrong number of digits, or the email is malformed.
    pub fn into_details(self) -> Result<ContactDetails, ContactDomainError> {
        let name = ContactName::new(self.name.trim())?;
        if !is_valid_phone(&self.phone) {
            return Err(ContactDomainError::InvalidPhone(self.phone));
        }
        if !is_valid_email(&self.email) {
            return Err(ContactDomainError::InvalidEmail(self.email));
        }

        Ok(ContactDetails {
            name,
            phone: normalize_phone(&self.phone),
            email: non_blank(&self.email),
            address: non_blank(&self.address),
            notes: non_blank(&self.notes),
            avatar_path: self.avatar_path,
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

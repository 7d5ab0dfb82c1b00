//! Core types for emergency contacts.
//!
//! Contacts live only in memory for the lifetime of a session. They are
//! never persisted, never synced, and never mutated after creation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a contact.
///
/// Derived from the wall clock in milliseconds and forced to be strictly
/// increasing within a session, so two contacts added in the same
/// millisecond still get distinct identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContactId(String);

impl ContactId {
    pub(crate) fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An emergency contact.
///
/// Both `name` and `phone` are guaranteed non-empty when the contact was
/// produced by a [`ContactList`](super::ContactList). The phone number is
/// free-form; no format validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Session-unique identifier.
    pub id: ContactId,
    /// Display name.
    pub name: String,
    /// Phone number as entered by the user.
    pub phone: String,
}

impl Contact {
    /// Returns the line shown for this contact in a list, `"name: phone"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use smartcane_core::contacts::ContactList;
    ///
    /// let mut contacts = ContactList::new();
    /// let mom = contacts.add_contact("Mom", "555-1111").unwrap();
    /// assert_eq!(mom.display_line(), "Mom: 555-1111");
    /// ```
    #[must_use]
    pub fn display_line(&self) -> String {
        format!("{}: {}", self.name, self.phone)
    }
}

/// Settings for the contact list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContactSettings {
    /// Maximum number of contacts held at once. `0` means unlimited.
    pub max_contacts: usize,
}

impl ContactSettings {
    /// Returns the configured limit, or `None` when unlimited.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        if self.max_contacts == 0 {
            None
        } else {
            Some(self.max_contacts)
        }
    }
}

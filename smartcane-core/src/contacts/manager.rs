//! In-memory emergency contact list.
//!
//! The list only supports appending and removing the most recently added
//! contact. There is no removal by selection.

use log::debug;

use super::error::{ContactError, Result};
use super::types::{Contact, ContactId, ContactSettings};

/// Ordered list of emergency contacts.
///
/// All methods take `&mut self` and are expected to be called from the UI
/// event task; the list holds no locks.
///
/// # Example
///
/// ```
/// use smartcane_core::contacts::ContactList;
///
/// let mut contacts = ContactList::new();
/// contacts.add_contact("Mom", "555-1111").unwrap();
/// contacts.add_contact("Dad", "555-2222").unwrap();
///
/// let removed = contacts.remove_last().unwrap();
/// assert_eq!(removed.name, "Dad");
/// assert_eq!(contacts.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ContactList {
    contacts: Vec<Contact>,
    settings: ContactSettings,
    last_id_millis: i64,
}

impl ContactList {
    /// Creates an empty, unlimited contact list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty contact list with the given settings.
    #[must_use]
    pub fn with_settings(settings: ContactSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Validates and appends a new contact, returning it.
    ///
    /// A field consisting only of whitespace counts as empty. Values are
    /// stored exactly as entered. Duplicates are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::Validation`] if `name` or `phone` is empty,
    /// or [`ContactError::Full`] if the configured limit has been reached.
    /// The list is left unchanged on error.
    pub fn add_contact(&mut self, name: &str, phone: &str) -> Result<Contact> {
        if name.trim().is_empty() {
            return Err(ContactError::Validation("name"));
        }
        if phone.trim().is_empty() {
            return Err(ContactError::Validation("phone"));
        }
        if let Some(limit) = self.settings.limit() {
            if self.contacts.len() >= limit {
                return Err(ContactError::Full(limit));
            }
        }

        let contact = Contact {
            id: self.next_id(),
            name: name.to_string(),
            phone: phone.to_string(),
        };
        self.contacts.push(contact.clone());
        debug!("Added contact {} ({} total)", contact.id, self.contacts.len());

        Ok(contact)
    }

    /// Removes and returns the most recently added contact.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::EmptyList`] if there is nothing to remove.
    pub fn remove_last(&mut self) -> Result<Contact> {
        let contact = self.contacts.pop().ok_or(ContactError::EmptyList)?;
        debug!(
            "Removed contact {} ({} remaining)",
            contact.id,
            self.contacts.len()
        );
        Ok(contact)
    }

    /// Returns the contacts in insertion order.
    #[must_use]
    pub fn list(&self) -> &[Contact] {
        &self.contacts
    }

    /// Returns the number of contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Returns whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Returns the settings this list was created with.
    #[must_use]
    pub const fn settings(&self) -> ContactSettings {
        self.settings
    }

    fn next_id(&mut self) -> ContactId {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_id_millis = now.max(self.last_id_millis + 1);
        ContactId::from_millis(self.last_id_millis)
    }
}

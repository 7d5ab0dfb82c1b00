//! Emergency contact management.
//!
//! Contacts are held in memory only. The list supports two mutations:
//! appending a validated contact and removing the most recently added one.
//!
//! # Types
//!
//! - [`ContactList`]: the ordered, in-memory list
//! - [`Contact`]: a name and phone number with a session-unique id
//! - [`ContactError`]: validation, empty-list, and capacity failures

mod error;
mod manager;
pub mod types;

pub use error::{ContactError, Result};
pub use manager::ContactList;
pub use types::{Contact, ContactId, ContactSettings};

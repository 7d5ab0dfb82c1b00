//! Error types for emergency contact operations.

use thiserror::Error;

/// Error type for contact list operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// A required field was empty or missing.
    #[error("Missing required field: {0}")]
    Validation(&'static str),

    /// Removal was attempted on an empty list.
    #[error("No contact to remove")]
    EmptyList,

    /// The configured contact limit has been reached.
    #[error("Contact list is full ({0} contacts)")]
    Full(usize),
}

/// Result type alias for contact operations.
pub type Result<T> = std::result::Result<T, ContactError>;

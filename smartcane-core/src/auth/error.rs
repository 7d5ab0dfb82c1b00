//! Error type for identity provider operations.

use thiserror::Error;

/// Failure reported by the identity provider.
///
/// The message is shown to the user verbatim, so it is carried as-is
/// without any prefix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    message: String,
}

impl AuthError {
    /// Creates an error carrying the provider's message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for identity provider operations.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_verbatim_message() {
        let err = AuthError::new("Firebase: Error (auth/wrong-password).");
        assert_eq!(err.to_string(), "Firebase: Error (auth/wrong-password).");
        assert_eq!(err.message(), "Firebase: Error (auth/wrong-password).");
    }
}

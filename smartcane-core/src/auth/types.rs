//! Credential and session types.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Email and password submitted from the login screen.
///
/// # Security
///
/// - Both fields are zeroized on drop via `ZeroizeOnDrop`
/// - The password never appears in `Debug` output
///
/// # Example
///
/// ```
/// use smartcane_core::auth::Credentials;
///
/// let credentials = Credentials::new("user@example.com", "hunter2");
/// assert_eq!(credentials.email(), "user@example.com");
/// assert!(!format!("{credentials:?}").contains("hunter2"));
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from the raw field values.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password. Only identity provider implementations should
    /// need this.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns whether both fields are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated identity-provider handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Provider-assigned user id.
    pub uid: String,
    /// Email address the user signed in with.
    pub email: String,
}

impl Session {
    /// Creates a session for the given user.
    #[must_use]
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials::new("a@b.c", "s3cret-pass");
        let debug_str = format!("{credentials:?}");

        assert!(debug_str.contains("a@b.c"));
        assert!(debug_str.contains("<redacted>"));
        assert!(!debug_str.contains("s3cret-pass"));
    }

    #[test]
    fn credentials_completeness() {
        assert!(Credentials::new("a@b.c", "pw").is_complete());
        assert!(!Credentials::new("", "pw").is_complete());
        assert!(!Credentials::new("a@b.c", "").is_complete());
    }

    #[test]
    fn credentials_zeroize_clears_fields() {
        let mut credentials = Credentials::new("a@b.c", "pw");
        credentials.zeroize();
        assert!(credentials.email().is_empty());
        assert!(credentials.password().is_empty());
    }

    #[test]
    fn session_new() {
        let session = Session::new("uid-1", "a@b.c");
        assert_eq!(session.uid, "uid-1");
        assert_eq!(session.email, "a@b.c");
    }
}

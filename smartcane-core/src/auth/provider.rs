//! Identity provider collaborator.

use async_trait::async_trait;

use super::error::AuthResult;
use super::types::{Credentials, Session};

/// Hosted identity provider.
///
/// Constructed once at application start and shared by every component
/// that needs authentication, typically as `Arc<dyn IdentityProvider>`.
/// Session and token management stay on the provider side.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Signs in an existing user.
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session>;

    /// Registers a new user and signs them in.
    async fn sign_up(&self, credentials: &Credentials) -> AuthResult<Session>;

    /// Sends a password reset email.
    async fn send_password_reset(&self, email: &str) -> AuthResult<()>;

    /// Ends the current session.
    async fn sign_out(&self) -> AuthResult<()>;
}

//! Authentication against a hosted identity provider.
//!
//! The provider itself is an external collaborator reached through
//! [`IdentityProvider`]. This module only defines the interface, the
//! credential and session types, and the error surfaced to the user.

mod error;
mod provider;
pub mod types;

pub use error::{AuthError, AuthResult};
pub use provider::IdentityProvider;
pub use types::{Credentials, Session};

//! Error types for location operations.

use thiserror::Error;

/// Message surfaced when the user refuses location access.
pub const PERMISSION_DENIED_MESSAGE: &str = "Permission to access location was denied";

/// Errors surfaced by the location observer and positioning service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// Foreground location permission was refused.
    #[error("Permission to access location was denied")]
    PermissionDenied,

    /// The platform could not provide a fix or a subscription.
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Result type for location operations.
pub type LocationResult<T> = Result<T, LocationError>;

//! Error types for obstacle guidance.

use thiserror::Error;

/// Errors raised by the guidance collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuidanceError {
    /// The camera or model failed to produce a frame.
    #[error("Detector failed: {0}")]
    Detector(String),

    /// A message could not be delivered to the phone.
    #[error("Guidance link failed: {0}")]
    Link(String),
}

/// Result type for guidance operations.
pub type GuidanceResult<T> = Result<T, GuidanceError>;

//! Obstacle guidance for the cane itself.
//!
//! The cane's camera feeds an object detector. Every frame's detections
//! are sorted into left, center and right thirds of the view by box
//! center, and the area of each zone is summed:
//! - Detections scoring 0.5 or less are ignored
//! - Boxes covering less than 1% of the frame are ignored
//! - The user is told to move towards a side only when it is strictly the
//!   least occupied zone, otherwise to move forward
//! - At most one message every 5 seconds reaches the phone
//!
//! Camera, model and the phone link are collaborators behind
//! [`ObstacleDetector`] and [`GuidanceLink`].
//!
//! # Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use smartcane_core::guidance::{GuidanceLoop, GuidanceSettings};
//!
//! let mut guidance = GuidanceLoop::new(
//!     Arc::new(camera_detector),
//!     Arc::new(bluetooth_link),
//!     GuidanceSettings::default(),
//! );
//! let sent = guidance.run().await?;
//! ```

mod decider;
mod error;
mod service;
pub mod types;

pub use decider::{GuidanceDecider, GuidanceLoop, GuidanceStep};
pub use error::{GuidanceError, GuidanceResult};
pub use service::{GuidanceLink, ObstacleDetector};
pub use types::{BoundingBox, Detection, Direction, GuidanceSettings, Zone, ZoneOccupancy};

//! Collaborators for the guidance loop: the on-cane detector and the link
//! to the phone.

use async_trait::async_trait;

use super::error::GuidanceResult;
use super::types::{Detection, Direction};

/// Source of per-frame object detections, typically a camera feeding an
/// object detection model.
#[async_trait]
pub trait ObstacleDetector: Send + Sync {
    /// Captures and analyzes the next frame.
    ///
    /// Returns `Ok(None)` once the camera has no more frames.
    async fn next_frame(&self) -> GuidanceResult<Option<Vec<Detection>>>;
}

/// Channel that delivers guidance messages to the user's phone.
#[async_trait]
pub trait GuidanceLink: Send + Sync {
    /// Sends one direction. The phone receives [`Direction::message`].
    async fn send(&self, direction: Direction) -> GuidanceResult<()>;
}

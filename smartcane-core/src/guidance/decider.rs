//! Turns detections into throttled walking directions.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};

use super::error::GuidanceResult;
use super::service::{GuidanceLink, ObstacleDetector};
use super::types::{Detection, Direction, GuidanceSettings, ZoneOccupancy};

/// Decides which way the user should move.
///
/// At most one direction is produced per message interval. The first one
/// is due one full interval after the decider was created.
#[derive(Debug, Clone)]
pub struct GuidanceDecider {
    settings: GuidanceSettings,
    last_message: Instant,
}

impl GuidanceDecider {
    /// Creates a decider whose throttle window starts at `now`.
    #[must_use]
    pub const fn new(settings: GuidanceSettings, now: Instant) -> Self {
        Self {
            settings,
            last_message: now,
        }
    }

    /// Returns the settings in use.
    #[must_use]
    pub const fn settings(&self) -> &GuidanceSettings {
        &self.settings
    }

    /// Sums the area of accepted detections per zone.
    ///
    /// Detections at or below the score threshold, smaller than the minimum
    /// area, or with a malformed box are ignored.
    #[must_use]
    pub fn occupancy(&self, detections: &[Detection]) -> ZoneOccupancy {
        let mut occupancy = ZoneOccupancy::default();
        for detection in detections {
            if !self.settings.accepts(detection) {
                continue;
            }
            let zone = self.settings.zone_of(detection.bbox.center_x());
            occupancy.add(zone, detection.bbox.area());
        }
        occupancy
    }

    /// Returns the direction for this frame if a message is due at `now`.
    pub fn decide(&mut self, detections: &[Detection], now: Instant) -> Option<Direction> {
        if now.saturating_duration_since(self.last_message) < self.settings.message_interval() {
            return None;
        }
        self.last_message = now;

        let occupancy = self.occupancy(detections);
        let direction = occupancy.direction();
        debug!("Zone occupancy {occupancy:?} -> {direction}");
        Some(direction)
    }
}

/// Outcome of processing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidanceStep {
    /// The detector has no more frames.
    Finished,
    /// The frame was processed but no message was due.
    Throttled,
    /// A direction was delivered.
    Sent(Direction),
    /// A direction was due but the link failed. The throttle window still
    /// restarts.
    SendFailed(Direction),
}

/// Reads frames from a detector and forwards directions to the phone.
pub struct GuidanceLoop {
    detector: Arc<dyn ObstacleDetector>,
    link: Arc<dyn GuidanceLink>,
    decider: GuidanceDecider,
}

impl GuidanceLoop {
    /// Creates a loop whose first message is due one interval from now.
    #[must_use]
    pub fn new(
        detector: Arc<dyn ObstacleDetector>,
        link: Arc<dyn GuidanceLink>,
        settings: GuidanceSettings,
    ) -> Self {
        Self::with_decider(detector, link, GuidanceDecider::new(settings, Instant::now()))
    }

    /// Creates a loop around an existing decider.
    #[must_use]
    pub fn with_decider(
        detector: Arc<dyn ObstacleDetector>,
        link: Arc<dyn GuidanceLink>,
        decider: GuidanceDecider,
    ) -> Self {
        Self {
            detector,
            link,
            decider,
        }
    }

    /// Processes one frame as if it arrived at `now`.
    ///
    /// # Errors
    ///
    /// Returns the detector's error. Link failures are logged and reported
    /// as [`GuidanceStep::SendFailed`].
    pub async fn step_at(&mut self, now: Instant) -> GuidanceResult<GuidanceStep> {
        let Some(detections) = self.detector.next_frame().await? else {
            return Ok(GuidanceStep::Finished);
        };
        let Some(direction) = self.decider.decide(&detections, now) else {
            return Ok(GuidanceStep::Throttled);
        };

        match self.link.send(direction).await {
            Ok(()) => {
                info!("Sent guidance: {direction}");
                Ok(GuidanceStep::Sent(direction))
            }
            Err(err) => {
                warn!("Guidance send error: {err}");
                Ok(GuidanceStep::SendFailed(direction))
            }
        }
    }

    /// Runs until the detector runs out of frames, returning how many
    /// directions were delivered.
    ///
    /// # Errors
    ///
    /// Stops at the first detector error.
    pub async fn run(&mut self) -> GuidanceResult<usize> {
        let mut sent = 0;
        loop {
            match self.step_at(Instant::now()).await? {
                GuidanceStep::Finished => break,
                GuidanceStep::Sent(_) => sent += 1,
                GuidanceStep::Throttled | GuidanceStep::SendFailed(_) => {}
            }
        }
        info!("Guidance loop finished after {sent} messages");
        Ok(sent)
    }
}

impl std::fmt::Debug for GuidanceLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuidanceLoop")
            .field("decider", &self.decider)
            .finish_non_exhaustive()
    }
}

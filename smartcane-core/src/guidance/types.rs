//! Obstacle guidance data types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default minimum detector confidence. Scores must be strictly above it.
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

/// Default minimum box area, as a fraction of the frame.
pub const DEFAULT_MIN_AREA: f64 = 0.01;

/// Default horizontal boundary between the left and center zones.
pub const DEFAULT_LEFT_BOUNDARY: f64 = 0.33;

/// Default horizontal boundary between the center and right zones.
pub const DEFAULT_RIGHT_BOUNDARY: f64 = 0.66;

/// Default minimum time between two guidance messages.
pub const DEFAULT_MESSAGE_INTERVAL_MS: u64 = 5_000;

/// Detector bounding box in normalized frame coordinates (0.0 to 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top edge.
    pub ymin: f64,
    /// Left edge.
    pub xmin: f64,
    /// Bottom edge.
    pub ymax: f64,
    /// Right edge.
    pub xmax: f64,
}

impl BoundingBox {
    /// Creates a box from the detector's `(ymin, xmin, ymax, xmax)` order.
    #[must_use]
    pub const fn new(ymin: f64, xmin: f64, ymax: f64, xmax: f64) -> Self {
        Self {
            ymin,
            xmin,
            ymax,
            xmax,
        }
    }

    /// Returns the share of the frame covered by the box.
    #[must_use]
    pub fn area(&self) -> f64 {
        (self.xmax - self.xmin) * (self.ymax - self.ymin)
    }

    /// Returns the horizontal center of the box.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        (self.xmin + self.xmax) / 2.0
    }

    /// Returns whether every edge is finite and the box is not inverted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.ymin, self.xmin, self.ymax, self.xmax]
            .iter()
            .all(|v| v.is_finite())
            && self.xmin <= self.xmax
            && self.ymin <= self.ymax
    }
}

/// One object reported by the on-cane detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Model class index. Not used for guidance.
    pub class_id: u32,
    /// Confidence from 0.0 to 1.0.
    pub score: f64,
    /// Location in the frame.
    pub bbox: BoundingBox,
}

impl Detection {
    /// Creates a detection.
    #[must_use]
    pub const fn new(class_id: u32, score: f64, bbox: BoundingBox) -> Self {
        Self {
            class_id,
            score,
            bbox,
        }
    }
}

/// Horizontal third of the camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Left of the left boundary.
    Left,
    /// Between the boundaries, inclusive.
    Center,
    /// Right of the right boundary.
    Right,
}

/// Walking direction announced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Step towards the left side.
    Left,
    /// Step towards the right side.
    Right,
    /// Keep going.
    Forward,
}

impl Direction {
    /// Returns the message sent to the phone.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Left => "Move left",
            Self::Right => "Move right",
            Self::Forward => "Move forward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Summed box area per zone for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoneOccupancy {
    /// Area in the left zone.
    pub left: f64,
    /// Area in the center zone.
    pub center: f64,
    /// Area in the right zone.
    pub right: f64,
}

impl ZoneOccupancy {
    /// Adds `area` to `zone`.
    pub fn add(&mut self, zone: Zone, area: f64) {
        match zone {
            Zone::Left => self.left += area,
            Zone::Center => self.center += area,
            Zone::Right => self.right += area,
        }
    }

    /// Returns the area recorded for `zone`.
    #[must_use]
    pub const fn get(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Left => self.left,
            Zone::Center => self.center,
            Zone::Right => self.right,
        }
    }

    /// Picks the direction towards the clearest side.
    ///
    /// A side wins only when it is strictly less occupied than both other
    /// zones. Every tie, including an empty frame, yields
    /// [`Direction::Forward`].
    ///
    /// # Examples
    ///
    /// ```
    /// use smartcane_core::guidance::{Direction, ZoneOccupancy};
    ///
    /// let occupancy = ZoneOccupancy { left: 0.0, center: 0.2, right: 0.1 };
    /// assert_eq!(occupancy.direction(), Direction::Left);
    /// assert_eq!(ZoneOccupancy::default().direction(), Direction::Forward);
    /// ```
    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.left < self.center && self.left < self.right {
            Direction::Left
        } else if self.right < self.center && self.right < self.left {
            Direction::Right
        } else {
            Direction::Forward
        }
    }
}

/// Tunables for obstacle guidance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceSettings {
    /// Detections must score strictly above this.
    pub min_score: f64,
    /// Boxes smaller than this share of the frame are ignored.
    pub min_area: f64,
    /// Box centers below this are in the left zone.
    pub left_boundary: f64,
    /// Box centers above this are in the right zone.
    pub right_boundary: f64,
    /// Minimum time between two messages.
    pub message_interval_ms: u64,
}

impl Default for GuidanceSettings {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            min_area: DEFAULT_MIN_AREA,
            left_boundary: DEFAULT_LEFT_BOUNDARY,
            right_boundary: DEFAULT_RIGHT_BOUNDARY,
            message_interval_ms: DEFAULT_MESSAGE_INTERVAL_MS,
        }
    }
}

impl GuidanceSettings {
    /// Returns the throttle interval.
    #[must_use]
    pub const fn message_interval(&self) -> Duration {
        Duration::from_millis(self.message_interval_ms)
    }

    /// Returns the zone holding a box centered at `center_x`.
    #[must_use]
    pub fn zone_of(&self, center_x: f64) -> Zone {
        if center_x < self.left_boundary {
            Zone::Left
        } else if center_x > self.right_boundary {
            Zone::Right
        } else {
            Zone::Center
        }
    }

    /// Returns whether a detection counts as an obstacle.
    #[must_use]
    pub fn accepts(&self, detection: &Detection) -> bool {
        detection.score > self.min_score
            && detection.bbox.is_valid()
            && detection.bbox.area() >= self.min_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_area_and_center() {
        let bbox = BoundingBox::new(0.0, 0.2, 0.5, 0.6);
        assert!((bbox.area() - 0.2).abs() < 1e-12);
        assert!((bbox.center_x() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn inverted_or_nan_box_is_invalid() {
        assert!(BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!BoundingBox::new(0.0, 0.6, 1.0, 0.2).is_valid());
        assert!(!BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn zone_boundaries_belong_to_center() {
        let settings = GuidanceSettings::default();
        assert_eq!(settings.zone_of(0.32), Zone::Left);
        assert_eq!(settings.zone_of(0.33), Zone::Center);
        assert_eq!(settings.zone_of(0.66), Zone::Center);
        assert_eq!(settings.zone_of(0.67), Zone::Right);
    }

    #[test]
    fn score_threshold_is_strict() {
        let settings = GuidanceSettings::default();
        let bbox = BoundingBox::new(0.0, 0.0, 0.5, 0.5);
        assert!(!settings.accepts(&Detection::new(1, 0.5, bbox)));
        assert!(settings.accepts(&Detection::new(1, 0.51, bbox)));
    }

    #[test]
    fn tiny_boxes_are_rejected() {
        let settings = GuidanceSettings::default();
        let tiny = BoundingBox::new(0.0, 0.0, 0.05, 0.1);
        assert!(!settings.accepts(&Detection::new(1, 0.9, tiny)));
    }

    #[test]
    fn direction_prefers_strictly_clearest_side() {
        let right = ZoneOccupancy {
            left: 0.3,
            center: 0.2,
            right: 0.1,
        };
        assert_eq!(right.direction(), Direction::Right);

        let tie = ZoneOccupancy {
            left: 0.1,
            center: 0.3,
            right: 0.1,
        };
        assert_eq!(tie.direction(), Direction::Forward);
    }

    #[test]
    fn direction_messages() {
        assert_eq!(Direction::Left.to_string(), "Move left");
        assert_eq!(Direction::Right.to_string(), "Move right");
        assert_eq!(Direction::Forward.to_string(), "Move forward");
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: GuidanceSettings = serde_json::from_str(r#"{"min_score": 0.7}"#).unwrap();
        assert!((settings.min_score - 0.7).abs() < f64::EPSILON);
        assert_eq!(settings.message_interval_ms, DEFAULT_MESSAGE_INTERVAL_MS);
    }
}

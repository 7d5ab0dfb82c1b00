//! Location data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default minimum time between position callbacks.
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 5_000;

/// Default minimum displacement between position callbacks.
pub const DEFAULT_MIN_DISPLACEMENT_METERS: f64 = 5.0;

/// Default latitude/longitude span shown around the user on the map.
pub const DEFAULT_MAP_DELTA: f64 = 0.005;

/// Title of the marker placed at the current sample.
pub const MARKER_TITLE: &str = "You are here";

/// Coarse platform quality level for positioning requests.
///
/// Higher tiers trade battery for precision. The mapping to concrete
/// platform constants is left to the [`PositioningService`] implementation.
///
/// [`PositioningService`]: super::PositioningService
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyTier {
    /// Lowest power, city-block level.
    Low,
    /// Balanced power and accuracy.
    Balanced,
    /// Best available without extra sensors; default for the home screen.
    #[default]
    High,
    /// Highest accuracy the platform offers.
    Highest,
}

/// Runtime permission for foreground positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// Not yet requested.
    #[default]
    Unknown,
    /// The user allowed location access.
    Granted,
    /// The user refused location access.
    Denied,
}

impl PermissionState {
    /// Returns whether positioning may proceed.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// A single position fix.
///
/// The observer keeps only the most recent sample; every update replaces
/// the previous one wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    /// Latitude in degrees, -90.0 to 90.0.
    pub latitude: f64,
    /// Longitude in degrees, -180.0 to 180.0.
    pub longitude: f64,
    /// Reported horizontal accuracy in meters, if the platform provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// When the fix was taken (UTC).
    pub timestamp: DateTime<Utc>,
}

impl LocationSample {
    /// Creates a sample stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use smartcane_core::location::LocationSample;
    ///
    /// let sample = LocationSample::new(37.7749, -122.4194);
    /// assert!(sample.is_valid());
    /// assert!(sample.accuracy.is_none());
    /// ```
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            timestamp: Utc::now(),
        }
    }

    /// Sets the reported accuracy in meters.
    #[must_use]
    pub const fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy = Some(meters);
        self
    }

    /// Returns whether both coordinates are finite and within range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Parameters for a continuous position subscription.
///
/// The time and distance thresholds are OR-combined by the platform:
/// whichever is crossed first triggers a callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Requested accuracy tier.
    pub accuracy: AccuracyTier,
    /// Minimum time between callbacks, in milliseconds.
    pub min_interval_ms: u64,
    /// Minimum displacement between callbacks, in meters.
    pub min_displacement_meters: f64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            accuracy: AccuracyTier::High,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            min_displacement_meters: DEFAULT_MIN_DISPLACEMENT_METERS,
        }
    }
}

/// Settings for live location on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    /// Accuracy tier for the subscription.
    pub accuracy: AccuracyTier,
    /// Minimum time between callbacks, in milliseconds.
    pub min_interval_ms: u64,
    /// Minimum displacement between callbacks, in meters.
    pub min_displacement_meters: f64,
    /// Latitude/longitude span of the map region around the user.
    pub map_delta: f64,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            accuracy: AccuracyTier::High,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            min_displacement_meters: DEFAULT_MIN_DISPLACEMENT_METERS,
            map_delta: DEFAULT_MAP_DELTA,
        }
    }
}

impl LocationSettings {
    /// Returns the subscription parameters described by these settings.
    #[must_use]
    pub const fn watch_config(&self) -> WatchConfig {
        WatchConfig {
            accuracy: self.accuracy,
            min_interval_ms: self.min_interval_ms,
            min_displacement_meters: self.min_displacement_meters,
        }
    }
}

/// The map viewport centered on a sample, with a single marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    /// Center latitude (also the marker position).
    pub latitude: f64,
    /// Center longitude (also the marker position).
    pub longitude: f64,
    /// Vertical span in degrees.
    pub latitude_delta: f64,
    /// Horizontal span in degrees.
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Centers a region of the given span on `sample`.
    #[must_use]
    pub const fn around(sample: &LocationSample, delta: f64) -> Self {
        Self {
            latitude: sample.latitude,
            longitude: sample.longitude,
            latitude_delta: delta,
            longitude_delta: delta,
        }
    }

    /// Returns the marker title for this region.
    #[must_use]
    pub const fn marker_title(&self) -> &'static str {
        MARKER_TITLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_tier_default_is_high() {
        assert_eq!(AccuracyTier::default(), AccuracyTier::High);
    }

    #[test]
    fn permission_state_default_is_unknown() {
        assert_eq!(PermissionState::default(), PermissionState::Unknown);
        assert!(!PermissionState::Unknown.is_granted());
        assert!(!PermissionState::Denied.is_granted());
        assert!(PermissionState::Granted.is_granted());
    }

    #[test]
    fn watch_config_defaults() {
        let config = WatchConfig::default();
        assert_eq!(config.accuracy, AccuracyTier::High);
        assert_eq!(config.min_interval_ms, 5_000);
        assert!((config.min_displacement_meters - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn location_settings_defaults_match_watch_config() {
        let settings = LocationSettings::default();
        assert_eq!(settings.watch_config(), WatchConfig::default());
        assert!((settings.map_delta - 0.005).abs() < f64::EPSILON);
    }

    #[test]
    fn sample_validity() {
        assert!(LocationSample::new(90.0, 180.0).is_valid());
        assert!(LocationSample::new(-90.0, -180.0).is_valid());
        assert!(!LocationSample::new(91.0, 0.0).is_valid());
        assert!(!LocationSample::new(0.0, -181.0).is_valid());
        assert!(!LocationSample::new(f64::NAN, 0.0).is_valid());
        assert!(!LocationSample::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn sample_with_accuracy() {
        let sample = LocationSample::new(1.0, 2.0).with_accuracy(12.5);
        assert_eq!(sample.accuracy, Some(12.5));
    }

    #[test]
    fn sample_json_omits_missing_accuracy() {
        let json = serde_json::to_string(&LocationSample::new(1.0, 2.0)).unwrap();
        assert!(json.contains("latitude"));
        assert!(json.contains("timestamp"));
        assert!(!json.contains("accuracy"));
    }

    #[test]
    fn map_region_centers_on_sample() {
        let sample = LocationSample::new(37.7749, -122.4194);
        let region = MapRegion::around(&sample, DEFAULT_MAP_DELTA);

        assert_eq!(region.latitude, 37.7749);
        assert_eq!(region.longitude, -122.4194);
        assert_eq!(region.latitude_delta, 0.005);
        assert_eq!(region.longitude_delta, 0.005);
        assert_eq!(region.marker_title(), "You are here");
    }

    #[test]
    fn accuracy_tier_serializes_snake_case() {
        let json = serde_json::to_string(&AccuracyTier::Highest).unwrap();
        assert_eq!(json, "\"highest\"");
    }
}

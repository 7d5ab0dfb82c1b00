//! Application configuration.
//!
//! All fields have defaults, so an empty JSON object is a complete
//! configuration. The host application may ship a JSON file to override
//! individual values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::contacts::ContactSettings;
use crate::guidance::GuidanceSettings;
use crate::location::LocationSettings;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Configuration for the Smart Cane core.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartCaneConfig {
    /// Live location settings.
    pub location: LocationSettings,
    /// Emergency contact settings.
    pub contacts: ContactSettings,
    /// Obstacle guidance settings.
    pub guidance: GuidanceSettings,
}

impl SmartCaneConfig {
    /// Parses and validates configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use smartcane_core::SmartCaneConfig;
    ///
    /// let config = SmartCaneConfig::from_json(r#"{"contacts": {"max_contacts": 5}}"#).unwrap();
    /// assert_eq!(config.contacts.max_contacts, 5);
    /// assert_eq!(config.location.min_interval_ms, 5000);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes this configuration to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (extremely rare).
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads and validates configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let location = &self.location;
        if location.min_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "location.min_interval_ms must be greater than 0".to_string(),
            ));
        }
        if !location.min_displacement_meters.is_finite() || location.min_displacement_meters < 0.0
        {
            return Err(ConfigError::Invalid(
                "location.min_displacement_meters must be a non-negative number".to_string(),
            ));
        }
        if !location.map_delta.is_finite() || location.map_delta <= 0.0 {
            return Err(ConfigError::Invalid(
                "location.map_delta must be a positive number".to_string(),
            ));
        }

        let guidance = &self.guidance;
        if !(0.0..=1.0).contains(&guidance.min_score) {
            return Err(ConfigError::Invalid(
                "guidance.min_score must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&guidance.min_area) {
            return Err(ConfigError::Invalid(
                "guidance.min_area must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0 < guidance.left_boundary
            && guidance.left_boundary < guidance.right_boundary
            && guidance.right_boundary < 1.0)
        {
            return Err(ConfigError::Invalid(
                "guidance zone boundaries must satisfy 0 < left < right < 1".to_string(),
            ));
        }
        if guidance.message_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "guidance.message_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

//! Tracker configuration with documented defaults
//!
//! Everything the front-end can tune lives here: where snapshots are kept
//! and which values a form field falls back to when its text is not a
//! number.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{Result, TrackerError};
use crate::core::types::HitPoints;

/// Storage key the snapshot is saved under
pub const DEFAULT_STORAGE_KEY: &str = "cavaleiros-do-caos-tracker";

/// Fallback values used when a draft field cannot be read as a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftDefaults {
    /// Armor class of a freshly added combatant
    pub armor_class: i32,

    /// Initiative used when the typed roll is not a number
    pub initiative: i32,

    /// Maximum hit points of a new combatant
    ///
    /// Must be at least 1. Players are added at full health, so this is
    /// also their starting HP.
    pub max_hit_points: HitPoints,

    /// Flat damage reduction for NPCs and monsters
    pub resistance: i32,
}

impl Default for DraftDefaults {
    fn default() -> Self {
        Self {
            armor_class: 10,
            initiative: 10,
            max_hit_points: 20,
            resistance: 0,
        }
    }
}

/// Configuration for the tracker front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Key the snapshot blob is stored under
    pub storage_key: String,

    /// Directory used by the file-backed snapshot store
    pub data_dir: PathBuf,

    /// Fallbacks for unreadable draft fields
    pub defaults: DraftDefaults,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: PathBuf::from("data"),
            defaults: DraftDefaults::default(),
        }
    }
}

impl TrackerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: TrackerConfig =
            toml::from_str(content).map_err(|e| TrackerError::Config(e.to_string()))?;
        config.validate().map_err(TrackerError::Config)?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.storage_key.trim().is_empty() {
            return Err("storage_key must not be empty".into());
        }

        if self.defaults.max_hit_points < 1 {
            return Err(format!(
                "defaults.max_hit_points ({}) must be at least 1",
                self.defaults.max_hit_points
            ));
        }

        if self.defaults.armor_class < 0 || self.defaults.resistance < 0 {
            return Err("defaults.armor_class and defaults.resistance must not be negative".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.defaults.armor_class, 10);
        assert_eq!(config.defaults.initiative, 10);
        assert_eq!(config.defaults.max_hit_points, 20);
        assert_eq!(config.defaults.resistance, 0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_str = r#"
            storage_key = "friday-group"

            [defaults]
            max_hit_points = 35
        "#;
        let config = TrackerConfig::parse_toml(toml_str).expect("Should parse partial config");
        assert_eq!(config.storage_key, "friday-group");
        assert_eq!(config.defaults.max_hit_points, 35);
        assert_eq!(config.defaults.initiative, 10);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_invalid_max_hit_points_rejected() {
        let toml_str = r#"
            [defaults]
            max_hit_points = 0
        "#;
        let err = TrackerConfig::parse_toml(toml_str).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let config = TrackerConfig {
            storage_key: "  ".into(),
            ..TrackerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TrackerConfig::parse_toml("storage_key = [").unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }
}

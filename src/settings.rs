//! User settings
//!
//! Persisted as JSON next to the high scores. Missing or corrupt files fall
//! back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::AxisShaping;
use crate::persistence::{self, StoreError};

/// Stick response curve presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Sensitivity {
    #[default]
    Normal,
    High,
}

impl Sensitivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensitivity::Normal => "NORMAL",
            Sensitivity::High => "HIGH",
        }
    }

    /// Exponent applied to the stick reading
    pub fn exponent(&self) -> f32 {
        match self {
            Sensitivity::Normal => 1.5,
            Sensitivity::High => 2.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Sensitivity::Normal => Sensitivity::High,
            Sensitivity::High => Sensitivity::Normal,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sensitivity: Sensitivity,
    /// Stick readings below this magnitude count as centred
    pub dead_zone: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensitivity: Sensitivity::Normal,
            dead_zone: 0.15,
        }
    }
}

impl Settings {
    pub fn toggle_sensitivity(&mut self) {
        self.sensitivity = self.sensitivity.toggled();
        log::info!("Sensitivity set to {}", self.sensitivity.as_str());
    }

    /// Stick shaping for the input driver
    pub fn axis_shaping(&self) -> AxisShaping {
        AxisShaping::new(self.dead_zone, self.sensitivity.exponent())
    }

    /// Load settings from `path`, or defaults
    pub fn load(path: &Path) -> Self {
        match persistence::read_json::<Settings>(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        persistence::write_json_atomic(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toggle_cycles() {
        let mut settings = Settings::default();
        settings.toggle_sensitivity();
        assert_eq!(settings.sensitivity, Sensitivity::High);
        assert_eq!(settings.axis_shaping().sensitivity, 2.0);
        settings.toggle_sensitivity();
        assert_eq!(settings.sensitivity, Sensitivity::Normal);
        assert_eq!(settings.axis_shaping().sensitivity, 1.5);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            sensitivity: Sensitivity::High,
            dead_zone: 0.2,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_missing_and_corrupt_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(Settings::load(&path), Settings::default());

        std::fs::write(&path, "sensitivity = HIGH").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "sensitivity": "High" }"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.sensitivity, Sensitivity::High);
        assert_eq!(settings.dead_zone, 0.15);
    }
}

//! Run settings and preferences
//!
//! Stored as JSON. Missing fields take their defaults and out-of-range values
//! are clamped on load.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::CraftKind;

/// Base speed slider range
pub const MIN_BASE_SPEED: f32 = 0.3;
pub const MAX_BASE_SPEED: f32 = 2.5;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for terrain, spawns and camera shake
    pub seed: u64,
    /// World speed before the score ramp
    pub base_speed: f32,
    /// Starting craft
    pub craft: CraftKind,

    // === Terrain ===
    pub terrain_amplitude: f32,
    pub terrain_frequency: f32,
    /// Emissive strength of the grid lines (renderer only)
    pub terrain_glow: f32,

    // === Visual Effects ===
    /// Camera shake on impacts
    pub screen_shake: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            base_speed: 1.0,
            craft: CraftKind::default(),

            terrain_amplitude: TERRAIN_AMPLITUDE,
            terrain_frequency: TERRAIN_FREQUENCY,
            terrain_glow: TERRAIN_GLOW,

            screen_shake: true,

            master_volume: 0.8,

            reduced_motion: false,
        }
    }
}

/// Clamp `value` into range, replacing NaN with `fallback`
fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

impl Settings {
    /// Copy with every tunable forced into its valid range
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        Self {
            base_speed: clamp_or(
                self.base_speed,
                MIN_BASE_SPEED,
                MAX_BASE_SPEED,
                defaults.base_speed,
            ),
            terrain_amplitude: clamp_or(self.terrain_amplitude, 0.0, 5.0, defaults.terrain_amplitude),
            terrain_frequency: clamp_or(
                self.terrain_frequency,
                0.01,
                0.3,
                defaults.terrain_frequency,
            ),
            terrain_glow: clamp_or(self.terrain_glow, 0.0, 2.0, defaults.terrain_glow),
            master_volume: clamp_or(self.master_volume, 0.0, 1.0, defaults.master_volume),
            ..self.clone()
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Multiplier applied to every camera shake request
    pub fn shake_scale(&self) -> f32 {
        if self.effective_screen_shake() { 1.0 } else { 0.0 }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "craft": "RailStriker" }"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.craft, CraftKind::RailStriker);
        assert_eq!(settings.base_speed, 1.0);
        assert!(settings.screen_shake);
    }

    #[test]
    fn test_sanitized_clamps_ranges() {
        let settings = Settings {
            base_speed: 9.0,
            terrain_amplitude: -1.0,
            terrain_frequency: f32::NAN,
            master_volume: 3.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.base_speed, MAX_BASE_SPEED);
        assert_eq!(settings.terrain_amplitude, 0.0);
        assert_eq!(settings.terrain_frequency, TERRAIN_FREQUENCY);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut settings = Settings::default();
        assert_eq!(settings.shake_scale(), 1.0);
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
        assert_eq!(settings.shake_scale(), 0.0);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/aether-runner/settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("aether-runner-{}.json", std::process::id()));
        let settings = Settings {
            seed: 7,
            base_speed: 2.0,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}

//! Tuning and preferences
//!
//! Every value defaults to the constant the game feel was tuned against, so a
//! settings file only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{Error, Result};

/// Player movement and collision response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Acceleration magnitude while a direction is held
    pub move_speed: f32,
    /// Speed cap
    pub max_velocity: f32,
    /// Fraction of velocity left after `damping_time` seconds without input
    pub damping: f32,
    pub damping_time: f32,
    /// Push-out gain per pass
    pub push_strength: f32,
    pub push_iterations: u32,
    /// Clearance below which the player touches a surface
    pub contact_threshold: f32,
    /// Scale lost per second while dead
    pub death_shrink_rate: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 5000.0,
            max_velocity: 900.0,
            damping: 0.2,
            damping_time: 0.1,
            push_strength: 4.0,
            push_iterations: PUSH_ITERATIONS,
            contact_threshold: CONTACT_THRESHOLD,
            death_shrink_rate: 4.0,
        }
    }
}

/// Easing of the growth factor toward the selected growth state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthTuning {
    /// Fraction of the remaining phase distance left after `growth_time` seconds
    pub growth_speed: f32,
    pub growth_time: f32,
}

impl Default for GrowthTuning {
    fn default() -> Self {
        Self {
            growth_speed: 0.3,
            growth_time: 0.1,
        }
    }
}

/// Distance field constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    /// Smooth-min blend radius for circles
    pub smooth_min_blend: f32,
    /// Central-difference offset for normals
    pub normal_epsilon: f32,
    /// Collision boxes are shrunk to this fraction of their visual size
    pub box_scale: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            smooth_min_blend: SMOOTH_MIN_BLEND,
            normal_epsilon: NORMAL_EPSILON,
            box_scale: BOX_COLLISION_SCALE,
        }
    }
}

/// Mixer preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
    /// Seconds for a fade in to reach full volume
    pub fade_in_duration: f32,
    /// Seconds for a fade out to reach silence
    pub fade_out_duration: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.25,
            muted: false,
            fade_in_duration: 1.0,
            fade_out_duration: 1.0,
        }
    }
}

impl AudioSettings {
    /// Master volume after mute
    pub fn effective_master_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume.clamp(0.0, 1.0) }
    }
}

/// All tunables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub movement: MovementTuning,
    pub growth: GrowthTuning,
    pub field: FieldTuning,
    pub audio: AudioSettings,
}

impl Settings {
    /// Parse and validate settings
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would divide by zero in the field or easing math
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("field.smooth_min_blend", self.field.smooth_min_blend),
            ("field.normal_epsilon", self.field.normal_epsilon),
            ("movement.damping_time", self.movement.damping_time),
            ("growth.growth_time", self.growth.growth_time),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidSetting { name, value });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Read settings from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuned_constants() {
        let s = Settings::default();
        assert_eq!(s.movement.move_speed, 5000.0);
        assert_eq!(s.movement.max_velocity, 900.0);
        assert_eq!(s.movement.push_iterations, 4);
        assert_eq!(s.growth.growth_speed, 0.3);
        assert_eq!(s.field.smooth_min_blend, 10.0);
        assert_eq!(s.field.normal_epsilon, 10.0);
        assert_eq!(s.audio.master_volume, 0.25);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"movement":{"max_velocity":450.0}}"#).unwrap();
        assert_eq!(s.movement.max_velocity, 450.0);
        assert_eq!(s.movement.move_speed, 5000.0);
        assert_eq!(s.field, FieldTuning::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = Settings::default();
        s.audio.muted = true;
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_zero_blend_rejected() {
        let err = Settings::from_json(r#"{"field":{"smooth_min_blend":0.0}}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSetting { name: "field.smooth_min_blend", .. }
        ));
    }

    #[test]
    fn test_non_positive_divisors_rejected() {
        for json in [
            r#"{"field":{"normal_epsilon":-1.0}}"#,
            r#"{"movement":{"damping_time":0.0}}"#,
            r#"{"growth":{"growth_time":0.0}}"#,
        ] {
            assert!(
                matches!(Settings::from_json(json), Err(Error::InvalidSetting { .. })),
                "accepted {json}"
            );
        }
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("growing_pains_zero_blend.json");
        std::fs::write(&path, r#"{"field":{"smooth_min_blend":0.0}}"#).unwrap();
        let s = Settings::load_or_default(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(Settings::from_json("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let s = Settings::load_or_default("/definitely/not/here.json");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_muted_volume() {
        let audio = AudioSettings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(audio.effective_master_volume(), 0.0);
        assert_eq!(AudioSettings::default().effective_master_volume(), 0.25);
    }
}

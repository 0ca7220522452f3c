//! Controller configuration, RON loading and validation.

use std::path::Path;

use bevy::log::info;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::stance::{Stance, StanceProfile, StanceProfiles};

/// Look and walk tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Yaw degrees per unit of horizontal view delta per second
    pub view_x_sensitivity: f32,
    /// Pitch degrees per unit of vertical view delta per second
    pub view_y_sensitivity: f32,
    pub view_x_inverted: bool,
    pub view_y_inverted: bool,
    /// Forward/back speed in m/s at full axis deflection
    pub walking_forward_speed: f32,
    /// Sideways speed in m/s at full axis deflection
    pub walking_strafe_speed: f32,
    /// Upward impulse applied on jump, in m/s
    pub jumping_height: f32,
    /// Time constant of the impulse decay, in seconds
    pub jumping_falloff: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            view_x_sensitivity: 12.0,
            view_y_sensitivity: 12.0,
            view_x_inverted: false,
            view_y_inverted: false,
            walking_forward_speed: 5.0,
            walking_strafe_speed: 4.0,
            jumping_height: 10.0,
            jumping_falloff: 0.3,
        }
    }
}

/// Fall acceleration and terminal velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravitySettings {
    /// Downward acceleration in m/s²
    pub amount: f32,
    /// Most negative vertical velocity gravity will produce, in m/s
    pub min: f32,
}

impl Default for GravitySettings {
    fn default() -> Self {
        Self {
            amount: 20.0,
            min: -50.0,
        }
    }
}

/// Pitch limits in degrees. Positive pitch looks down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewClamp {
    pub y_min: f32,
    pub y_max: f32,
}

impl Default for ViewClamp {
    fn default() -> Self {
        Self {
            y_min: -70.0,
            y_max: 80.0,
        }
    }
}

/// Collision body shape shared by every stance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    pub collider_radius: f32,
    /// Time constant for camera and collider stance transitions, in seconds
    pub stance_smoothing_time: f32,
}

impl Default for BodySettings {
    fn default() -> Self {
        Self {
            collider_radius: 0.3,
            stance_smoothing_time: 0.12,
        }
    }
}

/// Everything a [`FirstPersonController`](super::FirstPersonController) is built from.
///
/// Setting groups fall back to defaults when omitted from a RON file; the
/// stance profiles must always be given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocomotionConfig {
    #[serde(default)]
    pub movement: MovementSettings,
    #[serde(default)]
    pub gravity: GravitySettings,
    #[serde(default)]
    pub view_clamp: ViewClamp,
    #[serde(default)]
    pub body: BodySettings,
    pub stances: StanceProfiles,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            movement: MovementSettings::default(),
            gravity: GravitySettings::default(),
            view_clamp: ViewClamp::default(),
            body: BodySettings::default(),
            stances: StanceProfiles {
                stand: StanceProfile {
                    camera_height: 0.7,
                    collider_height: 1.8,
                    collider_center: bevy::math::Vec3::ZERO,
                },
                crouch: StanceProfile {
                    camera_height: 0.1,
                    collider_height: 1.2,
                    collider_center: bevy::math::Vec3::new(0.0, -0.3, 0.0),
                },
                prone: StanceProfile {
                    camera_height: -0.55,
                    collider_height: 0.6,
                    collider_center: bevy::math::Vec3::new(0.0, -0.6, 0.0),
                },
            },
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

impl LocomotionConfig {
    /// Parse a config from RON text and validate it.
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let config: LocomotionConfig = ron::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config = Self::from_ron_str(&contents)?;
        info!(path = %path.display(), "Loaded locomotion config");
        Ok(config)
    }

    /// Checks every value the tick pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        non_negative("view_x_sensitivity", m.view_x_sensitivity)?;
        non_negative("view_y_sensitivity", m.view_y_sensitivity)?;
        non_negative("walking_forward_speed", m.walking_forward_speed)?;
        non_negative("walking_strafe_speed", m.walking_strafe_speed)?;
        non_negative("jumping_height", m.jumping_height)?;
        positive("jumping_falloff", m.jumping_falloff)?;

        non_negative("gravity.amount", self.gravity.amount)?;
        if finite("gravity.min", self.gravity.min)? > 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "gravity.min",
                value: self.gravity.min,
            });
        }

        let min = finite("view_clamp.y_min", self.view_clamp.y_min)?;
        let max = finite("view_clamp.y_max", self.view_clamp.y_max)?;
        if min > max {
            return Err(ConfigError::InvertedPitchClamp { min, max });
        }

        positive("body.collider_radius", self.body.collider_radius)?;
        positive("body.stance_smoothing_time", self.body.stance_smoothing_time)?;

        for stance in [Stance::Stand, Stance::Crouch, Stance::Prone] {
            validate_profile(stance, self.stances.get(stance))?;
        }

        Ok(())
    }
}

fn validate_profile(stance: Stance, profile: &StanceProfile) -> Result<(), ConfigError> {
    if !profile.camera_height.is_finite() {
        return Err(ConfigError::InvalidProfile {
            stance,
            reason: "camera height must be finite",
        });
    }
    if !profile.collider_center.is_finite() {
        return Err(ConfigError::InvalidProfile {
            stance,
            reason: "collider center must be finite",
        });
    }
    if !(profile.collider_height.is_finite() && profile.collider_height > 0.0) {
        return Err(ConfigError::InvalidProfile {
            stance,
            reason: "collider height must be greater than zero",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANCES_RON: &str = "stances: (
        stand: (camera_height: 0.7, collider_height: 1.8, collider_center: (0.0, 0.0, 0.0)),
        crouch: (camera_height: 0.1, collider_height: 1.2, collider_center: (0.0, -0.3, 0.0)),
        prone: (camera_height: -0.5, collider_height: 0.6, collider_center: (0.0, -0.6, 0.0)),
    )";

    #[test]
    fn test_default_config_is_valid() {
        assert!(LocomotionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_omitted_groups_use_defaults() {
        let config = LocomotionConfig::from_ron_str(&format!("({STANCES_RON})")).unwrap();
        assert_eq!(config.movement, MovementSettings::default());
        assert_eq!(config.gravity, GravitySettings::default());
        assert_eq!(config.stances.prone.camera_height, -0.5);
    }

    #[test]
    fn test_partial_group_overrides() {
        let ron_str = format!(
            "(movement: (walking_forward_speed: 7.5, view_y_inverted: true), {STANCES_RON})"
        );
        let config = LocomotionConfig::from_ron_str(&ron_str).unwrap();
        assert_eq!(config.movement.walking_forward_speed, 7.5);
        assert!(config.movement.view_y_inverted);
        assert_eq!(config.movement.walking_strafe_speed, 4.0);
    }

    #[test]
    fn test_missing_stances_fails_to_parse() {
        let result = LocomotionConfig::from_ron_str("(movement: ())");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_non_positive_falloff_rejected() {
        let mut config = LocomotionConfig::default();
        config.movement.jumping_falloff = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "jumping_falloff", .. })
        ));
    }

    #[test]
    fn test_non_positive_smoothing_rejected() {
        let mut config = LocomotionConfig::default();
        config.body.stance_smoothing_time = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "body.stance_smoothing_time", .. })
        ));
    }

    #[test]
    fn test_nan_setting_rejected() {
        let mut config = LocomotionConfig::default();
        config.movement.view_x_sensitivity = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "view_x_sensitivity" })
        ));
    }

    #[test]
    fn test_positive_gravity_min_rejected() {
        let mut config = LocomotionConfig::default();
        config.gravity.min = 3.0;
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange { .. })));
    }

    #[test]
    fn test_inverted_pitch_clamp_rejected() {
        let mut config = LocomotionConfig::default();
        config.view_clamp = ViewClamp { y_min: 40.0, y_max: -40.0 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedPitchClamp { .. })
        ));
    }

    #[test]
    fn test_flat_profile_rejected() {
        let mut config = LocomotionConfig::default();
        config.stances.prone.collider_height = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProfile { stance: Stance::Prone, .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locomotion.ron");
        std::fs::write(
            &path,
            format!("// tuned for the test arena\n(gravity: (amount: 9.81), {STANCES_RON})"),
        )
        .unwrap();

        let config = LocomotionConfig::load(&path).unwrap();
        assert_eq!(config.gravity.amount, 9.81);
        assert_eq!(config.gravity.min, -50.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = LocomotionConfig::load(&dir.path().join("absent.ron"));
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }
}

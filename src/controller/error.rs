//! Error types for controller configuration and movement resolution.

use super::stance::Stance;

/// Errors raised while building a controller. These are only ever produced
/// at initialization; a controller that exists has valid configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read locomotion config: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to parse RON content (includes missing stance profiles).
    #[error("failed to parse locomotion config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// A numeric setting is NaN or infinite.
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },

    /// A time constant or size that must be strictly positive is not.
    #[error("`{field}` must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// A setting is outside its accepted range.
    #[error("`{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },

    /// The pitch clamp has its bounds swapped.
    #[error("view pitch clamp is inverted: min {min} > max {max}")]
    InvertedPitchClamp { min: f32, max: f32 },

    /// A stance profile has unusable geometry.
    #[error("invalid {stance:?} stance profile: {reason}")]
    InvalidProfile {
        stance: Stance,
        reason: &'static str,
    },

    /// The controller was asked to drive a rig or body that does not exist.
    #[error("unbound {what} reference")]
    UnboundReference { what: &'static str },
}

/// A displacement the mover could not resolve this tick.
///
/// Not fatal: the tick continues without moving and the last grounded state
/// is kept.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MoveError {
    #[error("displacement is not finite")]
    NonFiniteDisplacement,

    #[error("collider height {height} cannot be swept")]
    DegenerateCollider { height: f32 },
}

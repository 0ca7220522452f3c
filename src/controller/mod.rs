//! Engine-independent locomotion core.
//!
//! Everything here works in the controller's own frame (+Z forward, degrees)
//! and talks to the outside world only through [`CharacterBody`] and
//! [`CameraRig`].

mod body;
mod driver;
mod error;
mod gravity;
mod jump;
mod locomotion;
mod orientation;
mod settings;
mod smoothing;
mod stance;

pub use body::{CameraRig, CharacterBody};
pub use driver::{FirstPersonController, InputSnapshot, TickReport};
pub use error::{ConfigError, MoveError};
pub use gravity::{GravityModel, GROUND_BIAS};
pub use jump::JumpImpulse;
pub use locomotion::{LocomotionIntegrator, LocomotionStep};
pub use orientation::{OrientationController, OrientationState};
pub use settings::{BodySettings, GravitySettings, LocomotionConfig, MovementSettings, ViewClamp};
pub use smoothing::{smooth_damp, smooth_damp_vec3, SmoothedF32, SmoothedVec3};
pub use stance::{Stance, StanceProfile, StanceProfiles, StanceSample, StanceStateMachine};

//! Boundaries the controller drives but does not own.
//!
//! All values are in the controller's frame: +Y up, +Z forward, +X right,
//! angles in degrees, positive pitch looks down.

use bevy::math::Vec3;

use super::error::MoveError;

/// The owning body: a swept mover plus its collision volume.
pub trait CharacterBody {
    /// Sweeps the body by `delta` and reports whether it rests on a surface
    /// afterward. On `Err` the body must not have moved.
    fn move_by(&mut self, delta: Vec3) -> Result<bool, MoveError>;

    fn set_yaw(&mut self, degrees: f32);

    fn set_collider(&mut self, height: f32, center: Vec3);
}

/// The camera pivot: pitch rotation and local height.
pub trait CameraRig {
    fn pitch(&self) -> f32;

    fn set_pitch(&mut self, degrees: f32);

    fn height(&self) -> f32;

    fn set_height(&mut self, height: f32);
}

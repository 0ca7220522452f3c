//! Conversions between the controller frame and Bevy's.
//!
//! The controller treats +Z as forward and measures angles in degrees with
//! positive pitch looking down. Bevy is right-handed with -Z forward, so the
//! Z axis is mirrored and both rotations change sign.

use bevy::math::{EulerRot, Quat, Vec2, Vec3};

/// Mirrors a controller-frame vector into Bevy's frame (and back).
pub fn to_bevy(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, -v.z)
}

pub fn from_bevy(v: Vec3) -> Vec3 {
    to_bevy(v)
}

pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_y(-degrees.to_radians())
}

pub fn pitch_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_x(-degrees.to_radians())
}

/// Controller pitch of a Bevy rotation, ignoring yaw and roll
pub fn pitch_degrees(rotation: Quat) -> f32 {
    let (_, pitch, _) = rotation.to_euler(EulerRot::YXZ);
    -pitch.to_degrees()
}

/// Mouse motion arrives with +Y pointing down the screen.
pub fn view_delta(mouse: Vec2) -> Vec2 {
    Vec2::new(mouse.x, -mouse.y)
}

use bevy::prelude::*;

use crate::controller::CameraRig;
use crate::frame;

/// Marker for the pitch pivot (child of the player body, parent of the camera)
#[derive(Component)]
pub struct CameraPivot;

/// First-person camera settings
#[derive(Component, Clone)]
pub struct FpsCamera {
    /// Vertical field of view in radians
    pub fov: f32,
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self {
            fov: 90.0_f32.to_radians(),
        }
    }
}

/// The pivot's local transform is the rig: rotation carries pitch, translation.y
/// carries stance height. Yaw lives on the body, so any yaw or roll on the
/// pivot is discarded when pitch is written.
impl CameraRig for Transform {
    fn pitch(&self) -> f32 {
        frame::pitch_degrees(self.rotation)
    }

    fn set_pitch(&mut self, degrees: f32) {
        self.rotation = frame::pitch_rotation(degrees);
    }

    fn height(&self) -> f32 {
        self.translation.y
    }

    fn set_height(&mut self, height: f32) {
        self.translation.y = height;
    }
}

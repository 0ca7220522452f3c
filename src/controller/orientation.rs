use bevy::math::{Quat, Vec2};

use super::settings::{MovementSettings, ViewClamp};

/// Body yaw and camera pitch in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationState {
    /// Accumulates without wrapping
    pub yaw: f32,
    /// Positive looks down
    pub pitch: f32,
}

/// Turns view deltas into yaw and clamped pitch
#[derive(Debug, Clone)]
pub struct OrientationController {
    state: OrientationState,
    x_sensitivity: f32,
    y_sensitivity: f32,
    x_inverted: bool,
    y_inverted: bool,
    clamp: ViewClamp,
}

impl OrientationController {
    pub fn new(settings: &MovementSettings, clamp: ViewClamp) -> Self {
        Self {
            state: OrientationState::default(),
            x_sensitivity: settings.view_x_sensitivity,
            y_sensitivity: settings.view_y_sensitivity,
            x_inverted: settings.view_x_inverted,
            y_inverted: settings.view_y_inverted,
            clamp,
        }
    }

    pub fn state(&self) -> OrientationState {
        self.state
    }

    pub fn set_yaw(&mut self, degrees: f32) {
        self.state.yaw = degrees;
    }

    pub fn set_pitch(&mut self, degrees: f32) {
        self.state.pitch = degrees.clamp(self.clamp.y_min, self.clamp.y_max);
    }

    /// Positive `delta.x` turns right and positive `delta.y` looks up, unless inverted.
    pub fn apply_view(&mut self, delta: Vec2, dt: f32) -> OrientationState {
        let dx = if self.x_inverted { -delta.x } else { delta.x };
        let dy = if self.y_inverted { delta.y } else { -delta.y };

        self.state.yaw += self.x_sensitivity * dx * dt;
        self.state.pitch += self.y_sensitivity * dy * dt;
        self.state.pitch = self.state.pitch.clamp(self.clamp.y_min, self.clamp.y_max);

        self.state
    }

    /// Rotation about +Y that maps body-local movement into the world
    pub fn yaw_basis(&self) -> Quat {
        Quat::from_rotation_y(self.state.yaw.to_radians())
    }
}

use bevy::math::Vec3;

use super::gravity::GravityModel;
use super::settings::MovementSettings;
use super::smoothing::SmoothedVec3;

/// Upward impulse started by a jump and eased back to zero
#[derive(Debug, Clone)]
pub struct JumpImpulse {
    impulse: SmoothedVec3,
    height: f32,
    falloff: f32,
}

impl JumpImpulse {
    pub fn new(settings: &MovementSettings) -> Self {
        Self {
            impulse: SmoothedVec3::default(),
            height: settings.jumping_height,
            falloff: settings.jumping_falloff,
        }
    }

    pub fn impulse(&self) -> Vec3 {
        self.impulse.value
    }

    /// Starts a jump if `grounded`, cancelling any fall speed in `gravity`.
    ///
    /// Returns `false` and changes nothing when airborne.
    pub fn trigger(&mut self, grounded: bool, gravity: &mut GravityModel) -> bool {
        if !grounded {
            return false;
        }

        self.impulse.value = Vec3::Y * self.height;
        gravity.cancel();
        true
    }

    pub fn decay(&mut self, dt: f32) -> Vec3 {
        self.impulse.step(Vec3::ZERO, self.falloff, dt)
    }
}

use super::settings::GravitySettings;

/// Vertical velocity held while resting so the mover keeps reporting contact
pub const GROUND_BIAS: f32 = -0.1;

/// Accumulates fall speed while airborne and pins it to a small downward
/// bias on the ground.
#[derive(Debug, Clone)]
pub struct GravityModel {
    pub(crate) vertical_velocity: f32,
    fall_accel: f32,
    floor: f32,
}

impl GravityModel {
    pub fn new(settings: &GravitySettings) -> Self {
        Self {
            vertical_velocity: 0.0,
            fall_accel: settings.amount,
            floor: settings.min,
        }
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Drops any accumulated fall speed
    pub fn cancel(&mut self) {
        self.vertical_velocity = 0.0;
    }

    /// `grounded` is the mover's report from the previous tick.
    pub fn tick(&mut self, dt: f32, grounded: bool) -> f32 {
        if self.vertical_velocity > self.floor {
            self.vertical_velocity = (self.vertical_velocity - self.fall_accel * dt).max(self.floor);
        }

        if grounded && self.vertical_velocity < GROUND_BIAS {
            self.vertical_velocity = GROUND_BIAS;
        }

        self.vertical_velocity
    }
}

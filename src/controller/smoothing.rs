//! Critically damped smoothing.
//!
//! A closed-form spring step: `smooth_time` is roughly the time it takes the
//! value to reach its target, and the angular frequency is `2 / smooth_time`.
//! The value never overshoots the target; if a step would cross it, the value
//! lands exactly on the target and the spring comes to rest.

use bevy::math::Vec3;

/// Decay factor for one step of `omega * dt`, a cheap fit of `exp(-x)`
fn decay_factor(omega: f32, dt: f32) -> f32 {
    let x = omega * dt;
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// Advances `current` toward `target`, carrying spring velocity in `velocity`
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let omega = 2.0 / smooth_time;
    let exp = decay_factor(omega, dt);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let output = target + (change + temp) * exp;

    if (target - current > 0.0) == (output > target) {
        *velocity = 0.0;
        return target;
    }

    output
}

/// Vector form of [`smooth_damp`]. The overshoot test is done on the whole
/// vector so all components settle together.
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt <= 0.0 {
        return current;
    }

    let omega = 2.0 / smooth_time;
    let exp = decay_factor(omega, dt);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let output = target + (change + temp) * exp;

    if (target - current).dot(output - target) > 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }

    output
}

/// A scalar and its damping velocity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothedF32 {
    pub value: f32,
    pub velocity: f32,
}

impl SmoothedF32 {
    pub fn new(value: f32) -> Self {
        Self { value, velocity: 0.0 }
    }

    pub fn step(&mut self, target: f32, smooth_time: f32, dt: f32) -> f32 {
        self.value = smooth_damp(self.value, target, &mut self.velocity, smooth_time, dt);
        self.value
    }
}

/// A vector and its damping velocity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothedVec3 {
    pub value: Vec3,
    pub velocity: Vec3,
}

impl SmoothedVec3 {
    pub fn new(value: Vec3) -> Self {
        Self {
            value,
            velocity: Vec3::ZERO,
        }
    }

    pub fn step(&mut self, target: Vec3, smooth_time: f32, dt: f32) -> Vec3 {
        self.value = smooth_damp_vec3(self.value, target, &mut self.velocity, smooth_time, dt);
        self.value
    }
}

use bevy::math::{Quat, Vec2, Vec3};

use super::body::CharacterBody;
use super::error::MoveError;
use super::gravity::GravityModel;
use super::jump::JumpImpulse;
use super::settings::MovementSettings;

/// What one locomotion step asked for and what the mover made of it
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionStep {
    pub displacement: Vec3,
    /// Gravity velocity the displacement was built from
    pub vertical_velocity: f32,
    /// Grounded state to carry into the next tick
    pub grounded: bool,
    /// Set when the mover rejected the displacement
    pub stalled: Option<MoveError>,
}

/// Builds the per-tick displacement and hands it to the mover
#[derive(Debug, Clone)]
pub struct LocomotionIntegrator {
    forward_speed: f32,
    strafe_speed: f32,
}

impl LocomotionIntegrator {
    pub fn new(settings: &MovementSettings) -> Self {
        Self {
            forward_speed: settings.walking_forward_speed,
            strafe_speed: settings.walking_strafe_speed,
        }
    }

    /// World-space displacement for one tick.
    ///
    /// `axis.y` drives forward motion along local +Z, `axis.x` strafes along
    /// local +X; `yaw_basis` turns that into world space.
    pub fn displacement(
        &self,
        dt: f32,
        axis: Vec2,
        yaw_basis: Quat,
        vertical_velocity: f32,
        impulse: Vec3,
    ) -> Vec3 {
        let forward = self.forward_speed * axis.y * dt;
        let strafe = self.strafe_speed * axis.x * dt;

        let mut displacement = yaw_basis * Vec3::new(strafe, 0.0, forward);
        displacement.y += vertical_velocity * dt;
        displacement + impulse * dt
    }

    /// Advances gravity, computes the displacement and submits it to `body`.
    ///
    /// A failed move leaves `grounded` at its previous value.
    #[allow(clippy::too_many_arguments)]
    pub fn tick<B: CharacterBody>(
        &self,
        dt: f32,
        axis: Vec2,
        yaw_basis: Quat,
        gravity: &mut GravityModel,
        jump: &JumpImpulse,
        grounded: bool,
        body: &mut B,
    ) -> LocomotionStep {
        let vertical_velocity = gravity.tick(dt, grounded);
        let displacement = self.displacement(dt, axis, yaw_basis, vertical_velocity, jump.impulse());

        match body.move_by(displacement) {
            Ok(grounded) => LocomotionStep {
                displacement,
                vertical_velocity,
                grounded,
                stalled: None,
            },
            Err(error) => LocomotionStep {
                displacement,
                vertical_velocity,
                grounded,
                stalled: Some(error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn integrator() -> LocomotionIntegrator {
        LocomotionIntegrator::new(&MovementSettings {
            walking_forward_speed: 5.0,
            walking_strafe_speed: 4.0,
            ..Default::default()
        })
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_forward_at_zero_yaw() {
        let d = integrator().displacement(DT, Vec2::new(0.0, 1.0), Quat::IDENTITY, -0.1, Vec3::ZERO);
        assert!(approx(d, Vec3::new(0.0, -0.1 / 60.0, 5.0 / 60.0)), "{d:?}");
        assert!((d.y - -0.00167).abs() < 1e-5);
        assert!((d.z - 0.0833).abs() < 1e-4);
    }

    #[test]
    fn test_forward_at_quarter_turn() {
        let yaw = Quat::from_rotation_y(90.0_f32.to_radians());
        let d = integrator().displacement(DT, Vec2::new(0.0, 1.0), yaw, -0.1, Vec3::ZERO);
        assert!(approx(d, Vec3::new(5.0 / 60.0, -0.1 / 60.0, 0.0)), "{d:?}");
    }

    #[test]
    fn test_strafe_at_quarter_turn() {
        let yaw = Quat::from_rotation_y(90.0_f32.to_radians());
        let d = integrator().displacement(DT, Vec2::new(1.0, 0.0), yaw, 0.0, Vec3::ZERO);
        assert!(approx(d, Vec3::new(0.0, 0.0, -4.0 / 60.0)), "{d:?}");
    }

    #[test]
    fn test_impulse_scaled_by_dt() {
        let d = integrator().displacement(DT, Vec2::ZERO, Quat::IDENTITY, 0.0, Vec3::Y * 6.0);
        assert!(approx(d, Vec3::new(0.0, 0.1, 0.0)));
    }
}

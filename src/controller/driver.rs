use bevy::log::{debug, warn};
use bevy::math::{Vec2, Vec3};

use super::body::{CameraRig, CharacterBody};
use super::error::{ConfigError, MoveError};
use super::gravity::GravityModel;
use super::jump::JumpImpulse;
use super::locomotion::LocomotionIntegrator;
use super::orientation::{OrientationController, OrientationState};
use super::settings::LocomotionConfig;
use super::stance::{Stance, StanceStateMachine};

/// Latest input values; each write replaces the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Strafe (x) and forward (y), each in `[-1, 1]`
    pub movement: Vec2,
    /// Raw view delta, x right and y up
    pub view: Vec2,
}

/// Summary of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub orientation: OrientationState,
    pub displacement: Vec3,
    /// Vertical velocity this tick moved with, before any later jump
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub stalled: Option<MoveError>,
}

/// First-person locomotion: orientation, walking, gravity, jumping and stance.
///
/// Inputs are written between ticks. Jump, crouch and prone act immediately;
/// everything else is consumed by [`tick`](Self::tick), which advances the
/// pipeline in a fixed order: orientation, locomotion, jump decay, stance.
#[derive(Debug, Clone)]
pub struct FirstPersonController {
    config: LocomotionConfig,
    input: InputSnapshot,
    grounded: bool,
    orientation: OrientationController,
    gravity: GravityModel,
    jump: JumpImpulse,
    locomotion: LocomotionIntegrator,
    stance: StanceStateMachine,
}

impl FirstPersonController {
    /// Validates `config` and builds a standing controller facing yaw 0.
    pub fn new(config: LocomotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            input: InputSnapshot::default(),
            grounded: false,
            orientation: OrientationController::new(&config.movement, config.view_clamp),
            gravity: GravityModel::new(&config.gravity),
            jump: JumpImpulse::new(&config.movement),
            locomotion: LocomotionIntegrator::new(&config.movement),
            stance: StanceStateMachine::new(config.stances, config.body.stance_smoothing_time),
            config,
        })
    }

    /// Takes over the pitch and height a rig already has, so the first tick
    /// does not snap it.
    pub fn adopt_rig<R: CameraRig>(&mut self, rig: &R) {
        self.orientation.set_pitch(rig.pitch());
        self.stance.set_camera_height(rig.height());
    }

    pub fn set_yaw(&mut self, degrees: f32) {
        self.orientation.set_yaw(degrees);
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn input(&self) -> InputSnapshot {
        self.input
    }

    /// Components are clamped to `[-1, 1]`.
    pub fn set_movement(&mut self, axis: Vec2) {
        self.input.movement = axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    pub fn set_view(&mut self, delta: Vec2) {
        self.input.view = delta;
    }

    /// Jumps if the last move ended on the ground. Returns whether it did.
    pub fn jump(&mut self) -> bool {
        let jumped = self.jump.trigger(self.grounded, &mut self.gravity);
        if jumped {
            debug!("Jump started");
        }
        jumped
    }

    pub fn toggle_crouch(&mut self) -> Stance {
        let from = self.stance.stance();
        let to = self.stance.request_crouch_toggle();
        debug!(?from, ?to, "Stance change");
        to
    }

    pub fn prone(&mut self) -> Stance {
        let from = self.stance.stance();
        let to = self.stance.request_prone();
        debug!(?from, ?to, "Stance change");
        to
    }

    pub fn stance(&self) -> Stance {
        self.stance.stance()
    }

    pub fn orientation(&self) -> OrientationState {
        self.orientation.state()
    }

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.gravity.vertical_velocity()
    }

    pub fn jump_impulse(&self) -> Vec3 {
        self.jump.impulse()
    }

    pub fn camera_height(&self) -> f32 {
        self.stance.sample().camera_height
    }

    pub fn collider_height(&self) -> f32 {
        self.stance.sample().collider_height
    }

    pub fn collider_center(&self) -> Vec3 {
        self.stance.sample().collider_center
    }

    /// Runs one simulation step.
    ///
    /// Returns `None` without touching anything when `dt` is not a positive
    /// finite number.
    pub fn tick<B, R>(&mut self, dt: f32, body: &mut B, rig: &mut R) -> Option<TickReport>
    where
        B: CharacterBody,
        R: CameraRig,
    {
        if !(dt.is_finite() && dt > 0.0) {
            return None;
        }

        let orientation = self.orientation.apply_view(self.input.view, dt);
        body.set_yaw(orientation.yaw);
        rig.set_pitch(orientation.pitch);

        let step = self.locomotion.tick(
            dt,
            self.input.movement,
            self.orientation.yaw_basis(),
            &mut self.gravity,
            &self.jump,
            self.grounded,
            body,
        );
        if let Some(error) = &step.stalled {
            warn!(%error, displacement = ?step.displacement, "Move stalled");
        }
        self.grounded = step.grounded;

        self.jump.decay(dt);

        self.stance.set_camera_height(rig.height());
        let sample = self.stance.tick(dt);
        rig.set_height(sample.camera_height);
        body.set_collider(sample.collider_height, sample.collider_center);

        Some(TickReport {
            orientation,
            displacement: step.displacement,
            vertical_velocity: step.vertical_velocity,
            grounded: self.grounded,
            stalled: step.stalled,
        })
    }
}

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::input::{
    clear_view_input, handle_crouch, handle_jump, handle_look_input, handle_move_end,
    handle_move_input, handle_prone, CrouchAction, JumpAction, LookAction, MoveAction,
    ProneAction,
};
use super::state::*;
use super::tick::{sync_body_collider, tick_locomotion};
use crate::camera::{CameraPivot, FpsCamera};
use crate::controller::{ConfigError, FirstPersonController, LocomotionConfig};
use crate::frame;
use crate::physics::{body_capsule, BodyCollider, GameLayer};

/// Plugin for the first-person locomotion controller
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EnhancedInputPlugin>() {
            app.add_plugins(EnhancedInputPlugin);
        }

        // Register input context for player
        app.add_input_context::<Player>();
        app.add_message::<LocomotionMessage>();

        // Snapshot inputs
        app.add_observer(handle_move_input);
        app.add_observer(handle_move_end);
        app.add_observer(handle_look_input);

        // Discrete triggers act on receipt
        app.add_observer(handle_jump);
        app.add_observer(handle_crouch);
        app.add_observer(handle_prone);

        app.add_systems(Update, (tick_locomotion, sync_body_collider).chain());

        // View delta is per frame
        app.add_systems(Last, clear_view_input);
    }
}

/// Spawns a player body with its camera pivot, camera and collider.
///
/// `config` is validated first; nothing is spawned if it is rejected.
pub fn spawn_player(
    commands: &mut Commands,
    config: LocomotionConfig,
    position: Vec3,
) -> Result<Entity, ConfigError> {
    let body = spawn_body(commands, config, position)?;

    let camera_settings = FpsCamera::default();
    let camera = commands
        .spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: camera_settings.fov,
                ..default()
            }),
            camera_settings,
            Transform::default(),
        ))
        .id();
    commands.entity(body.pivot).add_child(camera);

    commands.entity(body.entity).insert(
        // Input bindings
        actions!(Player[
            (
                Action::<MoveAction>::new(),
                bindings![
                    (KeyCode::KeyW, SwizzleAxis::YXZ),
                    (KeyCode::KeyS, SwizzleAxis::YXZ, Negate::all()),
                    KeyCode::KeyD,
                    (KeyCode::KeyA, Negate::all()),
                ],
            ),
            (
                Action::<LookAction>::new(),
                bindings![
                    Binding::mouse_motion(),
                ],
            ),
            (
                Action::<JumpAction>::new(),
                bindings![KeyCode::Space, GamepadButton::South],
            ),
            (
                Action::<CrouchAction>::new(),
                bindings![KeyCode::KeyC, GamepadButton::East],
            ),
            (
                Action::<ProneAction>::new(),
                bindings![KeyCode::KeyZ, GamepadButton::West],
            ),
        ]),
    );

    info!(body = ?body.entity, %position, "Spawned player");
    Ok(body.entity)
}

/// Entities created by [`spawn_body`]
#[derive(Debug, Clone, Copy)]
pub struct SpawnedBody {
    pub entity: Entity,
    pub pivot: Entity,
    pub collider: Entity,
}

/// Spawns the controlled body without camera or input bindings.
///
/// The body gets the pitch pivot and collider children; attach a camera to
/// the pivot and feed the controller yourself.
pub fn spawn_body(
    commands: &mut Commands,
    config: LocomotionConfig,
    position: Vec3,
) -> Result<SpawnedBody, ConfigError> {
    let stand = config.stances.stand;
    let radius = config.body.collider_radius;
    let mut controller = FirstPersonController::new(config)?;

    // Pivot carries pitch and stance height; the controller starts from its pose
    let pivot_transform = Transform::from_xyz(0.0, stand.camera_height, 0.0);
    controller.adopt_rig(&pivot_transform);

    let pivot = commands
        .spawn((CameraPivot, pivot_transform, Visibility::default()))
        .id();

    let collider = commands
        .spawn((
            BodyCollider,
            body_capsule(radius, stand.collider_height),
            CollisionLayers::new(GameLayer::Player, [GameLayer::World, GameLayer::Trigger]),
            Transform::from_translation(frame::to_bevy(stand.collider_center)),
        ))
        .id();

    let entity = commands
        .spawn((Player, Locomotion(controller), LocomotionRig { pivot, collider }))
        .insert((
            // Kinematic: the controller's mover is the only thing that moves it
            RigidBody::Kinematic,
            Transform::from_translation(position).with_rotation(frame::yaw_rotation(0.0)),
            Visibility::default(),
        ))
        .id();

    // Hierarchy: body -> pivot (-> camera), body -> collider
    commands.entity(entity).add_child(pivot);
    commands.entity(entity).add_child(collider);

    Ok(SpawnedBody {
        entity,
        pivot,
        collider,
    })
}

use bevy::prelude::*;

use crate::controller::{FirstPersonController, MoveError, Stance};

/// Marker component for the player entity (also used as input context)
#[derive(Component, Default)]
pub struct Player;

/// The player's locomotion controller
#[derive(Component, Deref, DerefMut)]
pub struct Locomotion(pub FirstPersonController);

/// Entities the controller drives besides the body itself
#[derive(Component, Clone, Copy, Debug)]
pub struct LocomotionRig {
    /// Pitch pivot carrying the camera
    pub pivot: Entity,
    /// Child holding the collision capsule
    pub collider: Entity,
}

/// Marker: the mover reported ground contact on the last tick
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct Grounded;

/// Marker: the controller lost its rig and no longer ticks
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct Halted;

/// Notifications emitted by the player controller.
///
/// Consumers subscribe with `MessageReader<LocomotionMessage>` to drive
/// audio, animation or UI.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum LocomotionMessage {
    Jumped { entity: Entity },
    Landed { entity: Entity, impact_speed: f32 },
    LeftGround { entity: Entity },
    StanceChanged { entity: Entity, from: Stance, to: Stance },
    MoveStalled { entity: Entity, error: MoveError },
}

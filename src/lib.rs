pub mod camera;
pub mod controller;
pub mod frame;
pub mod physics;
pub mod player;

#[cfg(test)]
mod testing;

pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;

use bevy::prelude::*;

/// Unified plugin that adds physics and the first-person player systems.
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PhysicsPlugin>() {
            app.add_plugins(PhysicsPlugin);
        }
        if !app.is_plugin_added::<PlayerPlugin>() {
            app.add_plugins(PlayerPlugin);
        }
    }
}

pub mod prelude {
    pub use crate::camera::{CameraPivot, FpsCamera};
    pub use crate::controller::{
        ConfigError, FirstPersonController, LocomotionConfig, MoveError, Stance, StanceProfile,
    };
    pub use crate::physics::{GameLayer, PhysicsPlugin};
    pub use crate::player::{
        spawn_body, spawn_player, Grounded, Halted, Locomotion, LocomotionMessage,
        LocomotionRig, Player, PlayerPlugin, SpawnedBody,
    };
    pub use crate::LocomotionPlugin;
}

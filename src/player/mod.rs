pub mod input;
mod plugin;
mod state;
mod tick;

pub use plugin::{spawn_body, spawn_player, PlayerPlugin, SpawnedBody};
pub use state::*;
pub use tick::{sync_body_collider, tick_locomotion};

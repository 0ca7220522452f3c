mod ground;
mod layers;
mod mover;
mod plugin;

pub use ground::*;
pub use layers::GameLayer;
pub use mover::*;
pub use plugin::PhysicsPlugin;

use avian3d::prelude::*;

/// Collision layers for the physics simulation
#[derive(PhysicsLayer, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Player body collider
    Player,
    /// Static world geometry the mover sweeps against
    World,
    /// Triggers and sensors
    Trigger,
}

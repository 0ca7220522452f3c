//! Headless app and level pieces shared by the physics-backed tests.

use std::time::Duration;

use avian3d::prelude::*;
use bevy::{prelude::*, time::TimeUpdateStrategy};

use crate::physics::{GameLayer, PhysicsPlugin};

pub const DT: f32 = 1.0 / 60.0;

/// App with physics, fixed 60 Hz frames and no window or renderer
pub fn physics_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        bevy::asset::AssetPlugin::default(),
        bevy::mesh::MeshPlugin,
        bevy::scene::ScenePlugin,
        PhysicsPlugin,
    ))
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(DT)));

    app.finish();
    app.cleanup();
    app
}

/// Static world box of full extents `size` centered at `position`
pub fn spawn_block(app: &mut App, size: Vec3, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            CollisionLayers::new(GameLayer::World, [GameLayer::Player]),
            Transform::from_translation(position),
            Position(position),
        ))
        .id()
}

/// Wide slab whose top face is at y = 0
pub fn spawn_floor(app: &mut App) -> Entity {
    spawn_block(app, Vec3::new(40.0, 1.0, 40.0), Vec3::new(0.0, -0.5, 0.0))
}

/// Runs a few frames so static geometry is visible to spatial queries
pub fn settle(app: &mut App) {
    for _ in 0..3 {
        app.update();
    }
}

use avian3d::prelude::*;
use bevy::prelude::*;

/// Maximum angle (in radians) that can be stood on
pub const MAX_SLOPE_ANGLE: f32 = 0.785; // ~45 degrees

/// Distance to cast below the capsule for ground detection
pub const GROUND_CAST_DISTANCE: f32 = 0.1;

/// Checks for walkable ground under a capsule centered at `center`
pub fn is_on_ground(
    spatial_query: &SpatialQuery,
    center: Vec3,
    collider_radius: f32,
    collider_height: f32,
    world_layer: LayerMask,
) -> bool {
    // A smaller sphere keeps walls from counting as ground
    let cast_radius = collider_radius * 0.5;
    let cast_shape = Collider::sphere(cast_radius);

    // Start from the center of the capsule's lower hemisphere
    let half_height = (collider_height * 0.5).max(collider_radius);
    let cast_origin = center - Vec3::Y * (half_height - collider_radius);

    let config = ShapeCastConfig {
        max_distance: collider_radius - cast_radius + GROUND_CAST_DISTANCE,
        ..default()
    };
    let filter = SpatialQueryFilter::default().with_mask(world_layer);

    spatial_query
        .cast_shape(&cast_shape, cast_origin, Quat::IDENTITY, Dir3::NEG_Y, &config, &filter)
        .is_some_and(|hit| hit.normal1.angle_between(Vec3::Y) <= MAX_SLOPE_ANGLE)
}

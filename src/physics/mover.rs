use avian3d::prelude::*;
use bevy::prelude::*;

use super::ground::is_on_ground;
use crate::controller::{CharacterBody, MoveError};
use crate::frame;

/// Gap kept between the capsule and whatever it sweeps into
pub const SKIN_WIDTH: f32 = 0.01;

/// Collide-and-slide iterations per move
pub const MAX_SLIDES: usize = 4;

/// Displacements shorter than this are treated as resolved
const MIN_MOVE: f32 = 1.0e-5;

/// Smallest capsule segment Avian is given
const MIN_SEGMENT: f32 = 0.01;

/// Marker for the child entity holding the player's collision capsule
#[derive(Component)]
pub struct BodyCollider;

/// Builds the capsule for a full collider height (caps included)
pub fn body_capsule(radius: f32, height: f32) -> Collider {
    Collider::capsule(radius, (height - radius * 2.0).max(MIN_SEGMENT))
}

/// Kinematic mover backed by Avian spatial queries.
///
/// Borrowed for a single tick. Collider geometry set during the tick is only
/// recorded here; [`sync_body_collider`](crate::player::sync_body_collider)
/// copies it onto the collider entity afterwards.
pub struct AvianBody<'a, 'w, 's> {
    pub spatial_query: &'a SpatialQuery<'w, 's>,
    pub transform: &'a mut Transform,
    pub radius: f32,
    /// Full collider height
    pub height: f32,
    /// Collider offset from the body origin, in the controller frame
    pub center: Vec3,
    pub world_layer: LayerMask,
}

impl AvianBody<'_, '_, '_> {
    /// World-space center of the collider
    fn collider_origin(&self) -> Vec3 {
        self.transform.translation + self.transform.rotation * frame::to_bevy(self.center)
    }
}

impl CharacterBody for AvianBody<'_, '_, '_> {
    fn move_by(&mut self, delta: Vec3) -> Result<bool, MoveError> {
        if !delta.is_finite() {
            return Err(MoveError::NonFiniteDisplacement);
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(MoveError::DegenerateCollider { height: self.height });
        }

        let shape = body_capsule(self.radius, self.height);
        let filter = SpatialQueryFilter::default().with_mask(self.world_layer);
        let mut remaining = frame::to_bevy(delta);

        for _ in 0..MAX_SLIDES {
            let length = remaining.length();
            if length < MIN_MOVE {
                break;
            }
            let Ok(direction) = Dir3::new(remaining) else {
                break;
            };

            // Overlaps at the start of the cast are ignored so the body can leave them
            let config = ShapeCastConfig {
                max_distance: length + SKIN_WIDTH,
                ignore_origin_penetration: true,
                ..default()
            };
            let hit = self.spatial_query.cast_shape(
                &shape,
                self.collider_origin(),
                self.transform.rotation,
                direction,
                &config,
                &filter,
            );

            let Some(hit) = hit else {
                self.transform.translation += remaining;
                break;
            };

            // Stop just short of the surface, then slide the rest along it
            let travel = (hit.distance - SKIN_WIDTH).clamp(0.0, length);
            self.transform.translation += direction * travel;

            let left = direction * (length - travel);
            remaining = left - hit.normal1 * left.dot(hit.normal1);
        }

        Ok(is_on_ground(
            self.spatial_query,
            self.collider_origin(),
            self.radius,
            self.height,
            self.world_layer,
        ))
    }

    fn set_yaw(&mut self, degrees: f32) {
        self.transform.rotation = frame::yaw_rotation(degrees);
    }

    fn set_collider(&mut self, height: f32, center: Vec3) {
        self.height = height;
        self.center = center;
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::physics::GameLayer;
    use crate::testing::{physics_app, settle, spawn_block, spawn_floor};

    const RADIUS: f32 = 0.3;
    const STAND: f32 = 1.8;

    /// Repeats one move `steps` times from `start` and returns where the body
    /// ended up along with the last result.
    fn sweep(
        app: &mut App,
        start: Vec3,
        height: f32,
        center: Vec3,
        delta: Vec3,
        steps: usize,
    ) -> (Vec3, Result<bool, MoveError>) {
        app.world_mut()
            .run_system_once(move |spatial_query: SpatialQuery| {
                let mut transform = Transform::from_translation(start);
                let mut body = AvianBody {
                    spatial_query: &spatial_query,
                    transform: &mut transform,
                    radius: RADIUS,
                    height,
                    center,
                    world_layer: LayerMask::from(GameLayer::World),
                };
                let mut result = Ok(false);
                for _ in 0..steps {
                    result = body.move_by(delta);
                }
                (transform.translation, result)
            })
            .unwrap()
    }

    #[test]
    fn test_drop_onto_floor_stops_at_skin() {
        let mut app = physics_app();
        spawn_floor(&mut app);
        settle(&mut app);

        let start = Vec3::new(0.0, 0.95, 0.0);
        let (end, grounded) = sweep(&mut app, start, STAND, Vec3::ZERO, Vec3::new(0.0, -0.5, 0.0), 1);

        assert_eq!(grounded, Ok(true));
        assert!((end.y - (STAND / 2.0 + SKIN_WIDTH)).abs() < 5e-3, "{end:?}");
    }

    #[test]
    fn test_free_fall_is_not_grounded() {
        let mut app = physics_app();
        spawn_floor(&mut app);
        settle(&mut app);

        let start = Vec3::new(0.0, 5.0, 0.0);
        let (end, grounded) = sweep(&mut app, start, STAND, Vec3::ZERO, Vec3::new(0.0, -0.2, 0.0), 1);

        assert_eq!(grounded, Ok(false));
        assert!((end.y - 4.8).abs() < 1e-5);
    }

    #[test]
    fn test_wall_blocks_and_slides() {
        let mut app = physics_app();
        spawn_floor(&mut app);
        // Face at x = 1.5
        spawn_block(&mut app, Vec3::new(1.0, 3.0, 10.0), Vec3::new(2.0, 1.5, 0.0));
        settle(&mut app);

        let start = Vec3::new(0.0, 0.95, 0.0);
        let stop_x = 1.5 - RADIUS - SKIN_WIDTH;

        let (end, _) = sweep(&mut app, start, STAND, Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 1);
        assert!((end.x - stop_x).abs() < 5e-3, "{end:?}");

        // Controller +Z is Bevy -Z; the part into the wall is dropped, the rest slides
        let (end, _) = sweep(&mut app, start, STAND, Vec3::ZERO, Vec3::new(3.0, 0.0, 2.0), 1);
        assert!(end.x < stop_x + 5e-3, "{end:?}");
        assert!(end.z < -1.9, "{end:?}");
    }

    #[test]
    fn test_standing_up_under_low_ceiling_can_still_walk() {
        let mut app = physics_app();
        spawn_floor(&mut app);
        // Underside at y = 1.4
        spawn_block(&mut app, Vec3::new(10.0, 0.3, 10.0), Vec3::new(0.0, 1.55, 0.0));
        settle(&mut app);

        let start = Vec3::new(0.0, 0.911, 0.0);
        let step = Vec3::new(0.0, -0.1 / 60.0, 5.0 / 60.0);

        let (crouched, _) = sweep(&mut app, start, 1.2, Vec3::new(0.0, -0.3, 0.0), step, 30);
        assert!(crouched.z < -2.0, "{crouched:?}");

        // Full height pokes through the ceiling
        let (standing, grounded) = sweep(&mut app, start, STAND, Vec3::ZERO, step, 30);
        assert!(standing.z < -2.0, "{standing:?}");
        assert_eq!(grounded, Ok(true));
    }

    #[test]
    fn test_non_finite_delta_is_rejected() {
        let mut app = physics_app();
        spawn_floor(&mut app);
        settle(&mut app);

        let start = Vec3::new(0.0, 0.95, 0.0);
        let (end, result) = sweep(&mut app, start, STAND, Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0), 1);

        assert_eq!(result, Err(MoveError::NonFiniteDisplacement));
        assert_eq!(end, start);
    }

    #[test]
    fn test_flat_collider_is_rejected() {
        let mut app = physics_app();
        settle(&mut app);

        let start = Vec3::new(0.0, 0.95, 0.0);
        let (end, result) = sweep(&mut app, start, 0.0, Vec3::ZERO, Vec3::Z, 1);

        assert_eq!(result, Err(MoveError::DegenerateCollider { height: 0.0 }));
        assert_eq!(end, start);
    }

    #[test]
    fn test_yaw_faces_controller_forward() {
        let mut app = physics_app();
        settle(&mut app);

        let rotation = app
            .world_mut()
            .run_system_once(|spatial_query: SpatialQuery| {
                let mut transform = Transform::default();
                let mut body = AvianBody {
                    spatial_query: &spatial_query,
                    transform: &mut transform,
                    radius: RADIUS,
                    height: STAND,
                    center: Vec3::ZERO,
                    world_layer: LayerMask::from(GameLayer::World),
                };
                body.set_yaw(90.0);
                transform.rotation
            })
            .unwrap();

        assert!((rotation * Vec3::NEG_Z - Vec3::X).length() < 1e-5);
    }
}

use avian3d::prelude::*;
use bevy::prelude::*;

use super::state::*;
use crate::camera::CameraPivot;
use crate::controller::ConfigError;
use crate::frame;
use crate::physics::{body_capsule, AvianBody, BodyCollider, GameLayer};

/// Advances every player's controller by the frame delta
pub fn tick_locomotion(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    mut players: Query<
        (Entity, &mut Locomotion, &mut Transform, &LocomotionRig, Has<Grounded>),
        (With<Player>, Without<Halted>, Without<CameraPivot>),
    >,
    mut pivots: Query<&mut Transform, (With<CameraPivot>, Without<Player>)>,
    colliders: Query<(), With<BodyCollider>>,
    mut writer: MessageWriter<LocomotionMessage>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    let world_layer = LayerMask::from(GameLayer::World);

    for (entity, mut locomotion, mut transform, rig, was_grounded) in &mut players {
        let Ok(mut pivot) = pivots.get_mut(rig.pivot) else {
            halt(&mut commands, entity, "camera pivot");
            continue;
        };
        if !colliders.contains(rig.collider) {
            halt(&mut commands, entity, "body collider");
            continue;
        }

        let mut body = AvianBody {
            spatial_query: &spatial_query,
            transform: &mut transform,
            radius: locomotion.config().body.collider_radius,
            height: locomotion.collider_height(),
            center: locomotion.collider_center(),
            world_layer,
        };

        let Some(report) = locomotion.tick(dt, &mut body, &mut *pivot) else {
            continue;
        };

        if let Some(error) = report.stalled {
            writer.write(LocomotionMessage::MoveStalled { entity, error });
        }

        match (was_grounded, report.grounded) {
            (false, true) => {
                commands.entity(entity).insert(Grounded);
                writer.write(LocomotionMessage::Landed {
                    entity,
                    impact_speed: (-report.vertical_velocity).max(0.0),
                });
            }
            (true, false) => {
                commands.entity(entity).remove::<Grounded>();
                writer.write(LocomotionMessage::LeftGround { entity });
            }
            _ => {}
        }
    }
}

/// Rebuilds each player's capsule from the smoothed stance geometry
pub fn sync_body_collider(
    players: Query<(&Locomotion, &LocomotionRig), (With<Player>, Without<Halted>)>,
    mut colliders: Query<(&mut Collider, &mut Transform), With<BodyCollider>>,
) {
    for (locomotion, rig) in &players {
        let Ok((mut collider, mut transform)) = colliders.get_mut(rig.collider) else {
            continue;
        };

        let radius = locomotion.config().body.collider_radius;
        *collider = body_capsule(radius, locomotion.collider_height());
        transform.translation = frame::to_bevy(locomotion.collider_center());
    }
}

/// Stops a controller whose rig entities are gone
fn halt(commands: &mut Commands, entity: Entity, what: &'static str) {
    let error = ConfigError::UnboundReference { what };
    error!(?entity, %error, "Locomotion halted");
    commands.entity(entity).insert(Halted);
}

use bevy::ecs::observer::On;
use bevy::prelude::{EntityEvent, MessageWriter, Query, Vec2};
use bevy_enhanced_input::prelude::*;

use super::state::{Locomotion, LocomotionMessage};
use crate::frame;

/// Walk in a direction (WASD)
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct MoveAction;

/// Look around (mouse delta)
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct LookAction;

/// Jump action
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct JumpAction;

/// Crouch toggle
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct CrouchAction;

/// Go prone
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct ProneAction;

/// Caches the movement axis
pub fn handle_move_input(trigger: On<Fire<MoveAction>>, mut query: Query<&mut Locomotion>) {
    if let Ok(mut locomotion) = query.get_mut(trigger.event_target()) {
        locomotion.set_movement(trigger.value);
    }
}

/// Clear the movement axis when all movement keys are released
pub fn handle_move_end(trigger: On<Complete<MoveAction>>, mut query: Query<&mut Locomotion>) {
    if let Ok(mut locomotion) = query.get_mut(trigger.event_target()) {
        locomotion.set_movement(Vec2::ZERO);
    }
}

/// Caches the view delta
pub fn handle_look_input(trigger: On<Fire<LookAction>>, mut query: Query<&mut Locomotion>) {
    if let Ok(mut locomotion) = query.get_mut(trigger.event_target()) {
        locomotion.set_view(frame::view_delta(trigger.value));
    }
}

/// Jumps immediately on press
pub fn handle_jump(
    trigger: On<Start<JumpAction>>,
    mut query: Query<&mut Locomotion>,
    mut writer: MessageWriter<LocomotionMessage>,
) {
    let entity = trigger.event_target();
    if let Ok(mut locomotion) = query.get_mut(entity) {
        if locomotion.jump() {
            writer.write(LocomotionMessage::Jumped { entity });
        }
    }
}

/// Toggles crouch immediately on press
pub fn handle_crouch(
    trigger: On<Start<CrouchAction>>,
    mut query: Query<&mut Locomotion>,
    mut writer: MessageWriter<LocomotionMessage>,
) {
    let entity = trigger.event_target();
    if let Ok(mut locomotion) = query.get_mut(entity) {
        let from = locomotion.stance();
        let to = locomotion.toggle_crouch();
        writer.write(LocomotionMessage::StanceChanged { entity, from, to });
    }
}

/// Goes prone immediately on press
pub fn handle_prone(
    trigger: On<Start<ProneAction>>,
    mut query: Query<&mut Locomotion>,
    mut writer: MessageWriter<LocomotionMessage>,
) {
    let entity = trigger.event_target();
    if let Ok(mut locomotion) = query.get_mut(entity) {
        let from = locomotion.stance();
        let to = locomotion.prone();
        if from != to {
            writer.write(LocomotionMessage::StanceChanged { entity, from, to });
        }
    }
}

/// Clears the view delta each frame so a still mouse stops turning
pub fn clear_view_input(mut query: Query<&mut Locomotion>) {
    for mut locomotion in &mut query {
        locomotion.set_view(Vec2::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::prelude::{Entity, World};

    use super::*;
    use crate::controller::{FirstPersonController, LocomotionConfig, Stance};

    fn world() -> (World, Entity) {
        let mut world = World::new();
        world.init_resource::<Messages<LocomotionMessage>>();
        world.add_observer(handle_move_input);
        world.add_observer(handle_move_end);
        world.add_observer(handle_look_input);
        world.add_observer(handle_jump);
        world.add_observer(handle_crouch);
        world.add_observer(handle_prone);

        let controller = FirstPersonController::new(LocomotionConfig::default()).unwrap();
        let player = world.spawn(Locomotion(controller)).id();
        (world, player)
    }

    fn press<A: InputAction<Output = bool>>(world: &mut World, context: Entity) {
        world.trigger(Start::<A> {
            context,
            action: Entity::PLACEHOLDER,
            value: true,
            state: ActionState::Fired,
        });
    }

    fn fire<A: InputAction<Output = Vec2>>(world: &mut World, context: Entity, value: Vec2) {
        world.trigger(Fire::<A> {
            context,
            action: Entity::PLACEHOLDER,
            value,
            state: ActionState::Fired,
            fired_secs: 0.0,
            elapsed_secs: 0.0,
        });
    }

    fn sent(world: &World) -> Vec<LocomotionMessage> {
        world
            .resource::<Messages<LocomotionMessage>>()
            .iter_current_update_messages()
            .cloned()
            .collect()
    }

    fn locomotion(world: &World, player: Entity) -> &Locomotion {
        world.get::<Locomotion>(player).unwrap()
    }

    #[test]
    fn test_crouch_acts_on_press() {
        let (mut world, player) = world();
        press::<CrouchAction>(&mut world, player);

        assert_eq!(locomotion(&world, player).stance(), Stance::Crouch);
        assert_eq!(
            sent(&world),
            vec![LocomotionMessage::StanceChanged {
                entity: player,
                from: Stance::Stand,
                to: Stance::Crouch,
            }]
        );
    }

    #[test]
    fn test_repeated_prone_reports_once() {
        let (mut world, player) = world();
        press::<ProneAction>(&mut world, player);
        press::<ProneAction>(&mut world, player);

        assert_eq!(locomotion(&world, player).stance(), Stance::Prone);
        assert_eq!(sent(&world).len(), 1);
    }

    #[test]
    fn test_airborne_jump_is_ignored() {
        let (mut world, player) = world();
        press::<JumpAction>(&mut world, player);

        assert_eq!(locomotion(&world, player).jump_impulse(), bevy::math::Vec3::ZERO);
        assert!(sent(&world).is_empty());
    }

    #[test]
    fn test_move_axis_cached_until_release() {
        let (mut world, player) = world();
        fire::<MoveAction>(&mut world, player, Vec2::new(0.5, 1.0));
        assert_eq!(locomotion(&world, player).input().movement, Vec2::new(0.5, 1.0));

        world.trigger(Complete::<MoveAction> {
            context: player,
            action: Entity::PLACEHOLDER,
            value: Vec2::ZERO,
            state: ActionState::None,
            fired_secs: 0.0,
            elapsed_secs: 0.0,
        });
        assert_eq!(locomotion(&world, player).input().movement, Vec2::ZERO);
    }

    #[test]
    fn test_look_is_flipped_and_cleared_each_frame() {
        let (mut world, player) = world();
        fire::<LookAction>(&mut world, player, Vec2::new(3.0, -2.0));
        assert_eq!(locomotion(&world, player).input().view, Vec2::new(3.0, 2.0));

        world.run_system_once(clear_view_input).unwrap();
        assert_eq!(locomotion(&world, player).input().view, Vec2::ZERO);
    }
}

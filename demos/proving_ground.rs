use std::path::Path;

use avian3d::prelude::*;
use bevy::{prelude::*, window::{CursorGrabMode, CursorOptions, PrimaryWindow}};
use bevy_stance_locomotion::prelude::*;

const CONFIG_PATH: &str = "demos/locomotion.ron";

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Stance Locomotion Proving Ground".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(LocomotionPlugin)
        .init_resource::<HudState>()
        .add_systems(Startup, (setup, spawn_hud, setup_cursor_grab))
        .add_systems(Update, (toggle_cursor_grab, track_messages, update_hud).chain())
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = match LocomotionConfig::load(Path::new(CONFIG_PATH)) {
        Ok(config) => config,
        Err(error) => {
            warn!(%error, "Falling back to default locomotion config");
            LocomotionConfig::default()
        }
    };

    if let Err(error) = spawn_player(&mut commands, config, Vec3::new(0.0, 2.0, 0.0)) {
        error!(%error, "Player not spawned");
    }

    spawn_course(&mut commands, &mut meshes, &mut materials);
}

// ── HUD ─────────────────────────────────────────────────────────────

#[derive(Component)]
struct HudText;

/// Recent locomotion events and the last sampled position
#[derive(Resource, Default)]
struct HudState {
    last_position: Option<Vec3>,
    last_event: String,
    jumps: u32,
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        HudText,
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
    ));
}

fn track_messages(mut reader: MessageReader<LocomotionMessage>, mut hud: ResMut<HudState>) {
    for message in reader.read() {
        hud.last_event = match message {
            LocomotionMessage::Jumped { .. } => {
                hud.jumps += 1;
                "jumped".to_string()
            }
            LocomotionMessage::Landed { impact_speed, .. } => {
                format!("landed at {impact_speed:.1} m/s")
            }
            LocomotionMessage::LeftGround { .. } => "left ground".to_string(),
            LocomotionMessage::StanceChanged { from, to, .. } => format!("{from:?} -> {to:?}"),
            LocomotionMessage::MoveStalled { error, .. } => format!("stalled: {error}"),
        };
        info!("{message:?}");
    }
}

fn update_hud(
    player_query: Query<(&Locomotion, &Transform, Has<Grounded>), With<Player>>,
    mut hud_query: Query<&mut Text, With<HudText>>,
    mut hud: ResMut<HudState>,
    time: Res<Time>,
) {
    let Ok((locomotion, transform, grounded)) = player_query.single() else {
        return;
    };

    let position = transform.translation;
    let dt = time.delta_secs();
    let speed = match hud.last_position {
        Some(last) if dt > 0.0 => Vec2::new(position.x - last.x, position.z - last.z).length() / dt,
        _ => 0.0,
    };
    hud.last_position = Some(position);

    let orientation = locomotion.orientation();
    for mut text in &mut hud_query {
        **text = format!(
            "Stance:   {:?}\nGrounded: {}\nSpeed:    {:.1} m/s\nYaw:      {:.0}\nPitch:    {:.0}\nJumps:    {}\nLast:     {}",
            locomotion.stance(),
            grounded,
            speed,
            orientation.yaw,
            orientation.pitch,
            hud.jumps,
            hud.last_event,
        );
    }
}

// ── Course ───────────────────────────────────────────────────────────

fn spawn_course(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let ground_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.55, 0.35),
        perceptual_roughness: 0.9,
        ..default()
    });
    let stone = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.43, 0.44),
        perceptual_roughness: 0.85,
        ..default()
    });
    let ceiling_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.4, 0.6),
        perceptual_roughness: 0.5,
        ..default()
    });

    // Ground
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(120.0, 120.0))),
        MeshMaterial3d(ground_mat),
        Transform::default(),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
        CollisionLayers::new(GameLayer::World, [GameLayer::Player]),
    ));

    // Jump blocks of rising height
    for (i, height) in [0.4, 0.8, 1.2, 1.6].into_iter().enumerate() {
        let x = -6.0 + i as f32 * 3.0;
        spawn_box(commands, meshes, stone.clone(),
            Vec3::new(2.0, height, 2.0),
            Vec3::new(x, height / 2.0, -8.0),
        );
    }

    // Tunnels: crouch fits the first, only prone fits the second
    let tunnel_depth = 6.0;
    for (i, clearance) in [1.4_f32, 0.8].into_iter().enumerate() {
        let x = 8.0 + i as f32 * 5.0;
        let z = -4.0;

        spawn_box(commands, meshes, ceiling_mat.clone(),
            Vec3::new(3.0, 0.3, tunnel_depth),
            Vec3::new(x, clearance + 0.15, z),
        );
        for side in [-1.0, 1.0] {
            spawn_box(commands, meshes, stone.clone(),
                Vec3::new(0.3, clearance, tunnel_depth),
                Vec3::new(x + side * 1.65, clearance / 2.0, z),
            );
        }
    }

    // Perimeter walls
    for (size, position) in [
        (Vec3::new(60.0, 3.0, 0.5), Vec3::new(0.0, 1.5, -30.0)),
        (Vec3::new(60.0, 3.0, 0.5), Vec3::new(0.0, 1.5, 30.0)),
        (Vec3::new(0.5, 3.0, 60.0), Vec3::new(-30.0, 1.5, 0.0)),
        (Vec3::new(0.5, 3.0, 60.0), Vec3::new(30.0, 1.5, 0.0)),
    ] {
        spawn_box(commands, meshes, stone.clone(), size, position);
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 14000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.7, 0.5, 0.0)),
    ));

    commands.spawn(AmbientLight {
        color: Color::srgb(0.6, 0.7, 0.9),
        brightness: 350.0,
        affects_lightmapped_meshes: true,
    });
}

fn spawn_box(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    size: Vec3,
    position: Vec3,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(material),
        Transform::from_translation(position),
        RigidBody::Static,
        Collider::cuboid(size.x, size.y, size.z),
        CollisionLayers::new(GameLayer::World, [GameLayer::Player]),
    ));
}

// ── Cursor grab ──────────────────────────────────────────────────────

fn setup_cursor_grab(mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    if let Ok(mut cursor) = cursor_query.single_mut() {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

fn toggle_cursor_grab(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Ok(mut cursor) = cursor_query.single_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    } else if mouse.just_pressed(MouseButton::Left) && cursor.grab_mode == CursorGrabMode::None {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

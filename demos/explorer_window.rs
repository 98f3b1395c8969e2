//! Demonstrates the Scene Explorer window.
//!
//! Spawns a small 3D scene with a nested hierarchy and opens the explorer in a
//! separate window. The spinning entities show the transform pane being polled.

use bevy::prelude::*;
use scene_explorer::{ExplorerStart, ExplorerWindowPlugin, WellKnownAppExt};

#[derive(Component)]
struct Spin(f32);

#[derive(Component)]
struct Sun;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(ExplorerWindowPlugin)
        .register_well_known("sun", |world| {
            world
                .query_filtered::<Entity, With<Sun>>()
                .iter(world)
                .next()
        })
        .add_systems(Startup, setup)
        .add_systems(Update, spin)
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 4.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Main Camera"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.8, 0.4, 0.0)),
        Name::new("Sun"),
        Sun,
    ));

    let cube = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let red = materials.add(Color::srgb(0.8, 0.2, 0.2));
    let blue = materials.add(Color::srgb(0.2, 0.3, 0.8));

    // A parent with children and grandchildren to navigate through
    commands
        .spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(red.clone()),
            Transform::default(),
            Name::new("Solar System"),
            Spin(0.5),
            ExplorerStart,
        ))
        .with_children(|system| {
            system
                .spawn((
                    Mesh3d(cube.clone()),
                    MeshMaterial3d(blue.clone()),
                    Transform::from_xyz(3.0, 0.0, 0.0).with_scale(Vec3::splat(0.5)),
                    Name::new("Planet"),
                    Spin(1.5),
                ))
                .with_children(|planet| {
                    planet.spawn((
                        Mesh3d(cube.clone()),
                        MeshMaterial3d(red.clone()),
                        Transform::from_xyz(1.5, 0.0, 0.0).with_scale(Vec3::splat(0.3)),
                        Name::new("Moon"),
                    ));
                });

            system.spawn((
                PointLight {
                    intensity: 200_000.0,
                    range: 12.0,
                    ..default()
                },
                Transform::from_xyz(0.0, 2.0, 0.0),
                Name::new("Core Glow"),
            ));
        });

    // An unnamed entity shows the id fallback
    commands.spawn((
        Mesh3d(cube),
        MeshMaterial3d(blue),
        Transform::from_xyz(-3.0, 0.0, 0.0),
    ));

    commands.spawn((
        Text::new("Check the Scene Explorer window!\nF12 hides and shows the panel."),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

fn spin(time: Res<Time>, mut spinning: Query<(&Spin, &mut Transform)>) {
    for (spin, mut transform) in spinning.iter_mut() {
        transform.rotate_y(spin.0 * time.delta_secs());
    }
}

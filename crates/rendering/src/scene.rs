//! Mount and unmount of the navigator scene, plus the static dressing
//! (ground, roads, lights).

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use campus::camera::{OrbitController, PointerState};
use campus::config::{GROUND_COLOR, GROUND_SIZE, ROAD_COLOR, ROAD_LENGTH, ROAD_WIDTH};
use campus::{NavigatorSettings, Rgb};

use crate::building_registry::BuildingRegistry;
use crate::debug_overlay::DebugOverlay;
use crate::hover::{HoverPicking, HoveredBuilding};
use crate::input::Viewport;
use crate::NavigatorState;

/// Run condition: there is a window to draw into.
pub fn has_render_surface(windows: Query<(), With<PrimaryWindow>>) -> bool {
    !windows.is_empty()
}

/// Mounting without a surface is fatal: nothing is spawned and the app exits.
pub fn fail_mount(
    mut exit: EventWriter<AppExit>,
    mut next_state: ResMut<NextState<NavigatorState>>,
) {
    error!("Cannot mount campus navigator: no primary window to render into");
    next_state.set(NavigatorState::Unmounted);
    exit.send(AppExit::from_code(1));
}

/// Fresh camera, pointer and hover state for every mount.
pub fn reset_navigator_state(
    settings: Res<NavigatorSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut orbit: ResMut<OrbitController>,
    mut pointer: ResMut<PointerState>,
    mut viewport: ResMut<Viewport>,
    mut picking: ResMut<HoverPicking>,
    mut hovered: ResMut<HoveredBuilding>,
    mut overlay: ResMut<DebugOverlay>,
) {
    *orbit = OrbitController::default();
    *pointer = PointerState::default();
    *picking = HoverPicking::default();
    hovered.0 = None;
    *overlay = DebugOverlay::new(settings.show_debug);
    if let Ok(window) = windows.get_single() {
        viewport.size = Vec2::new(window.width(), window.height());
    }
    info!(
        "Mounting campus navigator ({:.0}x{:.0}, occupancy: {:?})",
        viewport.size.x, viewport.size.y, settings.occupancy
    );
}

pub fn spawn_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        StateScoped(NavigatorState::Mounted),
        Name::new("Sun"),
    ));

    let ground = materials.add(StandardMaterial {
        base_color: Rgb(GROUND_COLOR).to_color(),
        perceptual_roughness: 1.0,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(ground),
        Transform::from_xyz(0.0, -0.01, 0.0),
        StateScoped(NavigatorState::Mounted),
        Name::new("Ground"),
    ));

    // Two crossing roads through the origin.
    let road = materials.add(StandardMaterial {
        base_color: Rgb(ROAD_COLOR).to_color(),
        perceptual_roughness: 0.9,
        ..default()
    });
    for (name, size) in [
        ("Road EW", Vec2::new(ROAD_LENGTH, ROAD_WIDTH)),
        ("Road NS", Vec2::new(ROAD_WIDTH, ROAD_LENGTH)),
    ] {
        commands.spawn((
            Mesh3d(meshes.add(Plane3d::default().mesh().size(size.x, size.y))),
            MeshMaterial3d(road.clone()),
            Transform::default(),
            StateScoped(NavigatorState::Mounted),
            Name::new(name),
        ));
    }
}

/// Scene entities are state-scoped and despawn on their own; this drops
/// everything else the scene owned and stops in-flight fetches.
pub fn teardown_scene(
    mut commands: Commands,
    mut pointer: ResMut<PointerState>,
    mut picking: ResMut<HoverPicking>,
    mut hovered: ResMut<HoveredBuilding>,
) {
    let dropped = picking.in_flight();
    *picking = HoverPicking::default();
    *pointer = PointerState::default();
    hovered.0 = None;
    commands.remove_resource::<BuildingRegistry>();
    commands.insert_resource(AmbientLight::default());
    info!(
        "Unmounted campus navigator ({} pending occupancy request(s) dropped)",
        dropped
    );
}

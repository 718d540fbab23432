use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use campus::camera::OrbitController;
use campus::config::{
    BACKGROUND_COLOR, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, FOG_END, FOG_START,
};
use campus::Rgb;

use crate::NavigatorState;

/// The perspective camera orbiting the campus.
#[derive(Component)]
pub struct NavigatorCamera;

pub fn spawn_navigator_camera(mut commands: Commands, orbit: Res<OrbitController>) {
    let background = Rgb(BACKGROUND_COLOR).to_color();
    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(background),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        orbit.camera().transform(),
        DistanceFog {
            color: background,
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
        NavigatorCamera,
        StateScoped(NavigatorState::Mounted),
        Name::new("Navigator Camera"),
    ));
}

/// Apply the orbit state to the camera transform.
pub fn apply_orbit_camera(
    orbit: Res<OrbitController>,
    mut query: Query<&mut Transform, With<NavigatorCamera>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = orbit.camera().transform();
}

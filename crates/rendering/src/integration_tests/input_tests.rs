//! Orbit, zoom, keys and touch through real window events.

use std::f32::consts::PI;

use bevy::input::touch::TouchPhase;
use bevy::input::ButtonState;
use bevy::prelude::*;

use campus::camera::CameraState;
use campus::config::{MAX_DISTANCE, MIN_DISTANCE, ORBIT_SENSITIVITY, PHI_EPSILON};

use crate::labels::BuildingLabel;
use crate::test_harness::TestNavigator;

fn mounted() -> TestNavigator {
    let mut nav = TestNavigator::new();
    nav.mount();
    nav
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn test_left_drag_orbits_camera() {
    let mut nav = mounted();
    nav.drag(Vec2::new(600.0, 400.0), Vec2::new(700.0, 380.0));

    let camera = nav.camera();
    assert!(approx(camera.theta, -100.0 * ORBIT_SENSITIVITY), "got: {camera:?}");
    assert!(approx(camera.phi, PI / 4.0 + 20.0 * ORBIT_SENSITIVITY), "got: {camera:?}");

    let transform = nav.camera_transform().expect("camera entity");
    assert!(transform.translation.distance(camera.eye()) < 1e-4);
}

#[test]
fn test_moves_after_release_do_not_orbit() {
    let mut nav = mounted();
    nav.drag(Vec2::new(600.0, 400.0), Vec2::new(650.0, 400.0));
    let after_drag = nav.camera();

    nav.move_cursor(Vec2::new(900.0, 100.0));
    assert_eq!(nav.camera(), after_drag);
}

#[test]
fn test_right_button_does_not_orbit() {
    let mut nav = mounted();
    nav.move_cursor(Vec2::new(600.0, 400.0))
        .mouse_button(MouseButton::Right, ButtonState::Pressed)
        .move_cursor(Vec2::new(800.0, 300.0));
    assert_eq!(nav.camera(), CameraState::default());
}

#[test]
fn test_extreme_drag_keeps_phi_clamped() {
    let mut nav = mounted();
    nav.move_cursor(Vec2::new(600.0, 400.0))
        .mouse_button(MouseButton::Left, ButtonState::Pressed);
    for step in 1..=20 {
        nav.move_cursor(Vec2::new(600.0, 400.0 + step as f32 * 5_000.0));
        let camera = nav.camera();
        assert!(camera.phi >= PHI_EPSILON && camera.phi <= PI - PHI_EPSILON, "got: {camera:?}");
    }
    assert!(approx(nav.camera().phi, PHI_EPSILON));
}

#[test]
fn test_wheel_zooms_and_clamps() {
    let mut nav = mounted();
    nav.scroll_lines(1.0);
    assert!(approx(nav.camera().distance, 14.0), "got: {:?}", nav.camera());

    nav.scroll_lines(-1_000.0);
    assert_eq!(nav.camera().distance, MAX_DISTANCE);

    nav.scroll_lines(1_000.0);
    assert_eq!(nav.camera().distance, MIN_DISTANCE);
}

#[test]
fn test_r_resets_camera() {
    let mut nav = mounted();
    nav.drag(Vec2::new(100.0, 100.0), Vec2::new(400.0, 250.0))
        .scroll_lines(3.0);
    assert_ne!(nav.camera(), CameraState::default());

    nav.press_key(KeyCode::KeyR);
    assert_eq!(nav.camera(), CameraState::default());
}

#[test]
fn test_d_toggles_debug_readout() {
    let mut nav = mounted();
    assert!(nav.overlay().readout.is_none());

    nav.press_key(KeyCode::KeyD);
    assert_eq!(
        nav.overlay().readout.as_deref(),
        Some("Camera: θ=0.0° φ=45.0° dist=15.0")
    );

    nav.scroll_lines(-2.0);
    let readout = nav.overlay().readout.clone().expect("readout shown");
    assert!(readout.ends_with("dist=17.0"), "got: {readout}");

    nav.press_key(KeyCode::KeyD);
    assert!(nav.overlay().readout.is_none());
}

#[test]
fn test_first_touch_drives_orbit_and_second_is_ignored() {
    let mut nav = mounted();
    nav.touch(7, TouchPhase::Started, Vec2::new(300.0, 300.0))
        .touch(8, TouchPhase::Started, Vec2::new(900.0, 300.0))
        .touch(8, TouchPhase::Moved, Vec2::new(1_200.0, 300.0));
    assert_eq!(nav.camera(), CameraState::default(), "second finger ignored");

    nav.touch(7, TouchPhase::Moved, Vec2::new(340.0, 300.0));
    assert!(approx(nav.camera().theta, -40.0 * ORBIT_SENSITIVITY));

    nav.touch(7, TouchPhase::Ended, Vec2::new(340.0, 300.0))
        .touch(7, TouchPhase::Moved, Vec2::new(600.0, 300.0));
    assert!(approx(nav.camera().theta, -40.0 * ORBIT_SENSITIVITY));
}

#[test]
fn test_touch_hovers_buildings() {
    let mut nav = mounted();
    let point = nav.screen_point_of("Block 4");
    nav.touch(1, TouchPhase::Started, point);
    assert_eq!(nav.hovered_name(), Some("Block 4"));
}

#[test]
fn test_labels_face_the_camera() {
    let mut nav = mounted();
    nav.drag(Vec2::new(600.0, 400.0), Vec2::new(900.0, 300.0));

    let camera = nav.camera_transform().expect("camera entity");
    let world = nav.world_mut();
    let mut labels = world.query_filtered::<&Transform, With<BuildingLabel>>();
    let mut seen = 0;
    for label in labels.iter(world) {
        assert!(label.rotation.angle_between(camera.rotation) < 1e-4);
        seen += 1;
    }
    assert_eq!(seen, 5);
}

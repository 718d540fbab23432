//! Integration tests for the navigator scene using the `TestNavigator`
//! harness: a headless Bevy App with `NavigatorPlugin`, driven by synthetic
//! window input.

mod input_tests;

use bevy::prelude::*;

use crate::building_registry::{BuildingBody, BuildingRoot};
use crate::camera::NavigatorCamera;
use crate::labels::{BuildingLabel, LabelCamera};
use crate::test_harness::TestNavigator;
use crate::NavigatorState;

// ===========================================================================
// 1. Mount
// ===========================================================================

#[test]
fn test_navigator_starts_unmounted() {
    let mut nav = TestNavigator::new();
    assert_eq!(nav.state(), NavigatorState::Unmounted);
    assert_eq!(nav.count::<NavigatorCamera>(), 0);
    assert!(nav.registry().is_none());
}

#[test]
fn test_mount_builds_one_entity_set_per_building() {
    let mut nav = TestNavigator::new();
    nav.mount();

    assert_eq!(nav.state(), NavigatorState::Mounted);
    let registry = nav.registry().expect("registry after mount");
    assert_eq!(registry.len(), 5);
    assert!(registry.by_name("Block 3").is_some());
    assert!(registry.by_name("Block 9").is_none());

    assert_eq!(nav.count::<NavigatorCamera>(), 1);
    assert_eq!(nav.count::<BuildingRoot>(), 5);
    assert_eq!(nav.count::<BuildingBody>(), 5);
    assert_eq!(nav.count::<BuildingLabel>(), 5);
    assert_eq!(nav.count::<LabelCamera>(), 5);
}

#[test]
fn test_buildings_rest_on_their_base_elevation() {
    let mut nav = TestNavigator::new();
    nav.mount();
    let (transform, color) = nav.building_visual("HOD");
    assert_eq!(transform.translation, Vec3::new(4.0, 0.0, -5.0));
    assert_eq!(color, campus::Rgb(0x87ceeb).to_color());
}

#[test]
fn test_camera_starts_at_default_orbit() {
    let mut nav = TestNavigator::new();
    nav.mount();
    let camera = nav.camera_transform().expect("camera entity");
    let expected = campus::camera::CameraState::default().transform();
    assert!(
        camera.translation.distance(expected.translation) < 1e-5,
        "camera at {:?}, expected {:?}",
        camera.translation,
        expected.translation
    );
}

#[test]
fn test_mount_without_window_fails_fast() {
    let mut nav = TestNavigator::without_window();
    nav.mount();

    assert_eq!(nav.app().should_exit(), Some(AppExit::from_code(1)));
    assert_eq!(nav.count::<NavigatorCamera>(), 0);
    assert_eq!(nav.count::<BuildingRoot>(), 0);
    assert!(nav.registry().is_none());

    nav.update();
    assert_eq!(nav.state(), NavigatorState::Unmounted);
}

// ===========================================================================
// 2. Unmount
// ===========================================================================

#[test]
fn test_unmount_despawns_scene() {
    let mut nav = TestNavigator::new();
    let baseline = nav.entity_count();
    nav.mount();
    assert!(nav.entity_count() > baseline);

    nav.unmount();
    assert_eq!(nav.state(), NavigatorState::Unmounted);
    assert_eq!(nav.entity_count(), baseline, "scene entities leaked");
    assert!(nav.registry().is_none());
    assert!(nav.hovered().0.is_none());
}

#[test]
fn test_repeated_mount_cycles_leave_nothing_behind() {
    let mut nav = TestNavigator::new();
    let baseline = nav.entity_count();
    for cycle in 0..3 {
        nav.mount();
        assert_eq!(nav.count::<BuildingRoot>(), 5, "cycle {cycle}");
        nav.unmount();
        assert_eq!(nav.entity_count(), baseline, "cycle {cycle}");
    }
}

#[test]
fn test_frame_systems_stop_after_unmount() {
    let mut nav = TestNavigator::new();
    nav.mount();
    let point = nav.screen_point_of("Block 4");
    nav.unmount();

    nav.move_cursor(point).tick(3);
    assert!(nav.hovered().0.is_none(), "no picking while unmounted");
    assert_eq!(nav.picking().entries(), 0);
}

#[test]
fn test_remount_resets_camera() {
    let mut nav = TestNavigator::new();
    nav.mount();
    nav.scroll_lines(-5.0);
    assert_ne!(nav.camera(), campus::camera::CameraState::default());

    nav.unmount().mount();
    assert_eq!(nav.camera(), campus::camera::CameraState::default());
}

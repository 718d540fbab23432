//! The 3D campus scene and its per-frame driver.
//!
//! Everything here lives only while [`NavigatorState::Mounted`]: entering the
//! state builds the scene, leaving it tears the scene down and stops every
//! per-frame system.

use bevy::prelude::*;

pub mod building_registry;
pub mod camera;
pub mod debug_overlay;
pub mod hover;
pub mod input;
pub mod labels;
pub mod scene;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub(crate) mod test_harness;

use campus::camera::{OrbitController, PointerState};
use campus::clock::WallClock;
use campus::{CampusData, NavigatorSettings};

use building_registry::BuildingRegistry;
use debug_overlay::DebugOverlay;
use hover::{HoverPicking, HoveredBuilding};
use input::{UiPointerCapture, Viewport};

/// Whether the navigator scene exists.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavigatorState {
    #[default]
    Unmounted,
    Mounted,
}

/// Per-frame phases, run in this order while mounted. The frame itself is
/// submitted by Bevy's render schedule after `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigatorSet {
    /// Pointer, wheel, key and resize input.
    Input,
    /// Camera transform from the orbit state.
    Camera,
    /// Labels re-oriented to the camera.
    Labels,
    /// Hover picking and occupancy results.
    Picking,
    /// Debug readout.
    Debug,
}

pub struct NavigatorPlugin;

impl Plugin for NavigatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<NavigatorState>()
            .enable_state_scoped_entities::<NavigatorState>()
            .init_resource::<CampusData>()
            .init_resource::<NavigatorSettings>()
            .init_resource::<WallClock>()
            .init_resource::<OrbitController>()
            .init_resource::<PointerState>()
            .init_resource::<Viewport>()
            .init_resource::<UiPointerCapture>()
            .init_resource::<HoverPicking>()
            .init_resource::<HoveredBuilding>()
            .init_resource::<DebugOverlay>()
            .configure_sets(
                Update,
                (
                    NavigatorSet::Input,
                    NavigatorSet::Camera,
                    NavigatorSet::Labels,
                    NavigatorSet::Picking,
                    NavigatorSet::Debug,
                )
                    .chain()
                    .run_if(in_state(NavigatorState::Mounted)),
            )
            .add_systems(
                OnEnter(NavigatorState::Mounted),
                (
                    scene::fail_mount.run_if(not(scene::has_render_surface)),
                    (
                        scene::reset_navigator_state,
                        scene::spawn_environment,
                        camera::spawn_navigator_camera,
                        building_registry::build_registry,
                    )
                        .chain()
                        .run_if(scene::has_render_surface),
                ),
            )
            .add_systems(OnExit(NavigatorState::Mounted), scene::teardown_scene)
            .add_systems(
                Update,
                (
                    input::track_viewport,
                    input::collect_pointer_input,
                    input::handle_navigator_keys,
                )
                    .chain()
                    .in_set(NavigatorSet::Input),
            )
            .add_systems(
                Update,
                camera::apply_orbit_camera.in_set(NavigatorSet::Camera),
            )
            .add_systems(
                Update,
                labels::billboard_labels.in_set(NavigatorSet::Labels),
            )
            .add_systems(
                Update,
                (hover::pick_hovered_building, hover::poll_occupancy_fetches)
                    .chain()
                    .in_set(NavigatorSet::Picking)
                    .run_if(resource_exists::<BuildingRegistry>),
            )
            .add_systems(
                Update,
                debug_overlay::refresh_debug_readout.in_set(NavigatorSet::Debug),
            );
    }
}

//! # TestNavigator: headless harness for the navigator scene
//!
//! Wraps a Bevy `App` with the navigator plugin and just enough engine
//! plugins (assets, input, a window record without a real window) to mount
//! the scene and drive it with synthetic input.

use bevy::input::mouse::{MouseButtonInput, MouseScrollUnit, MouseWheel};
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::window::{CursorLeft, ExitCondition, PrimaryWindow};

use campus::camera::{CameraState, OrbitController};
use campus::clock::WallClock;
use campus::config::CAMERA_FOV_DEGREES;
use campus::schedule::Timestamp;
use campus::{CampusData, NavigatorSettings};

use crate::building_registry::{BuildingRegistry, BuildingRoot};
use crate::camera::NavigatorCamera;
use crate::debug_overlay::DebugOverlay;
use crate::hover::{HoverPicking, HoveredBuilding};
use crate::input::Viewport;
use crate::{NavigatorPlugin, NavigatorState};

/// Monday 09:30, inside Block 3's first session.
pub(crate) const MONDAY_0930: Timestamp = Timestamp {
    day_of_week: 1,
    hours: 9,
    minutes: 30,
};

pub(crate) struct TestNavigator {
    app: App,
}

impl TestNavigator {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// The built-in campus, a 1280x720 primary window and a clock frozen at
    /// [`MONDAY_0930`]. Not mounted yet.
    pub fn new() -> Self {
        Self::build(true, NavigatorSettings::default())
    }

    pub fn with_settings(settings: NavigatorSettings) -> Self {
        Self::build(true, settings)
    }

    /// No primary window: mounting has nothing to render into.
    pub fn without_window() -> Self {
        Self::build(false, NavigatorSettings::default())
    }

    fn build(with_window: bool, settings: NavigatorSettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(AssetPlugin::default());
        app.add_plugins(StatesPlugin);
        app.add_plugins(TransformPlugin);
        app.add_plugins(HierarchyPlugin);
        app.init_asset::<Mesh>();
        app.init_asset::<StandardMaterial>();
        app.init_asset::<Image>();
        app.add_plugins(bevy::input::InputPlugin);
        app.add_plugins(WindowPlugin {
            primary_window: with_window.then(Window::default),
            exit_condition: ExitCondition::DontExit,
            close_when_requested: false,
        });

        let data = CampusData::builtin().expect("embedded campus");
        app.insert_resource(data);
        app.insert_resource(settings);
        app.insert_resource(WallClock::Fixed(MONDAY_0930));
        app.add_plugins(NavigatorPlugin);

        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    pub fn mount(&mut self) -> &mut Self {
        self.set_state(NavigatorState::Mounted)
    }

    pub fn unmount(&mut self) -> &mut Self {
        self.set_state(NavigatorState::Unmounted)
    }

    fn set_state(&mut self, state: NavigatorState) -> &mut Self {
        self.app
            .world_mut()
            .resource_mut::<NextState<NavigatorState>>()
            .set(state);
        self.app.update();
        self
    }

    pub fn update(&mut self) -> &mut Self {
        self.app.update();
        self
    }

    pub fn tick(&mut self, frames: usize) -> &mut Self {
        for _ in 0..frames {
            self.app.update();
        }
        self
    }

    // -----------------------------------------------------------------------
    // Synthetic input (each call runs one frame)
    // -----------------------------------------------------------------------

    fn window(&mut self) -> Entity {
        let world = self.app.world_mut();
        world
            .query_filtered::<Entity, With<PrimaryWindow>>()
            .iter(world)
            .next()
            .unwrap_or(Entity::PLACEHOLDER)
    }

    pub fn move_cursor(&mut self, position: Vec2) -> &mut Self {
        let window = self.window();
        self.app.world_mut().send_event(CursorMoved {
            window,
            position,
            delta: None,
        });
        self.update()
    }

    pub fn leave_window(&mut self) -> &mut Self {
        let window = self.window();
        self.app.world_mut().send_event(CursorLeft { window });
        self.update()
    }

    pub fn mouse_button(&mut self, button: MouseButton, state: ButtonState) -> &mut Self {
        let window = self.window();
        self.app.world_mut().send_event(MouseButtonInput {
            button,
            state,
            window,
        });
        self.update()
    }

    pub fn drag(&mut self, from: Vec2, to: Vec2) -> &mut Self {
        self.move_cursor(from)
            .mouse_button(MouseButton::Left, ButtonState::Pressed)
            .move_cursor(to)
            .mouse_button(MouseButton::Left, ButtonState::Released)
    }

    pub fn scroll_lines(&mut self, lines: f32) -> &mut Self {
        let window = self.window();
        self.app.world_mut().send_event(MouseWheel {
            unit: MouseScrollUnit::Line,
            x: 0.0,
            y: lines,
            window,
        });
        self.update()
    }

    pub fn touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> &mut Self {
        let window = self.window();
        self.app.world_mut().send_event(TouchInput {
            phase,
            position,
            window,
            force: None,
            id,
        });
        self.update()
    }

    /// Press `key` for one run of `Update`. The input plugin's own frame
    /// bookkeeping is skipped so the press is seen as `just_pressed`.
    pub fn press_key(&mut self, key: KeyCode) -> &mut Self {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
        self.app.world_mut().run_schedule(Update);
        let mut keys = self.app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(key);
        keys.clear();
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn state(&self) -> NavigatorState {
        *self.app.world().resource::<State<NavigatorState>>().get()
    }

    pub fn camera(&self) -> CameraState {
        *self.app.world().resource::<OrbitController>().camera()
    }

    pub fn hovered(&self) -> &HoveredBuilding {
        self.app.world().resource::<HoveredBuilding>()
    }

    pub fn hovered_name(&self) -> Option<&str> {
        self.hovered().0.as_ref().map(|p| p.building.as_str())
    }

    pub fn picking(&self) -> &HoverPicking {
        self.app.world().resource::<HoverPicking>()
    }

    pub fn overlay(&self) -> &DebugOverlay {
        self.app.world().resource::<DebugOverlay>()
    }

    pub fn registry(&self) -> Option<&BuildingRegistry> {
        self.app.world().get_resource::<BuildingRegistry>()
    }

    pub fn count<C: Component>(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query_filtered::<(), With<C>>().iter(world).count()
    }

    pub fn entity_count(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query::<Entity>().iter(world).count()
    }

    pub fn camera_transform(&mut self) -> Option<Transform> {
        let world = self.app.world_mut();
        world
            .query_filtered::<&Transform, With<NavigatorCamera>>()
            .iter(world)
            .next()
            .copied()
    }

    /// Root transform and current material color of a building.
    pub fn building_visual(&mut self, name: &str) -> (Transform, Color) {
        let (root, material) = {
            let registry = self.registry().expect("scene mounted");
            let (_, building) = registry.by_name(name).expect("known building");
            (building.root, building.material.clone())
        };
        let world = self.app.world_mut();
        let transform = *world
            .query_filtered::<&Transform, With<BuildingRoot>>()
            .get(world, root)
            .expect("building root");
        let color = world
            .resource::<Assets<StandardMaterial>>()
            .get(&material)
            .expect("building material")
            .base_color;
        (transform, color)
    }

    /// Pixel position over the middle of a building's volume as seen from
    /// the current camera.
    pub fn screen_point_of(&self, name: &str) -> Vec2 {
        let data = self.app.world().resource::<CampusData>();
        let descriptor = data.descriptor(name).expect("known building");
        let target = descriptor.position + Vec3::Y * descriptor.size.y * 0.5;
        self.project(target)
    }

    pub fn project(&self, point: Vec3) -> Vec2 {
        let viewport = *self.app.world().resource::<Viewport>();
        let camera = self.camera().transform();
        let local = camera.compute_matrix().inverse().transform_point3(point);
        let half_height = (CAMERA_FOV_DEGREES.to_radians() * 0.5).tan();
        let half_width = half_height * viewport.aspect();
        let ndc = Vec2::new(
            local.x / -local.z / half_width,
            local.y / -local.z / half_height,
        );
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.size.x,
            (1.0 - ndc.y) * 0.5 * viewport.size.y,
        )
    }
}

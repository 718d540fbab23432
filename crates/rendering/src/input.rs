//! Raw window input turned into orbit controller events and pointer
//! coordinates for picking.
//!
//! These systems only run while the navigator is mounted, so nothing
//! listens once the scene is gone.

use bevy::input::mouse::{MouseButtonInput, MouseScrollUnit, MouseWheel};
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::{CursorLeft, PrimaryWindow, WindowResized};

use campus::camera::{viewport_to_ndc, OrbitController, PointerEvent, PointerId, PointerState};
use campus::config::WHEEL_LINE_PIXELS;

use crate::debug_overlay::DebugOverlay;

/// Logical size of the surface the scene is drawn into.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
}

impl Viewport {
    /// Width over height, or 1 for a degenerate viewport.
    pub fn aspect(&self) -> f32 {
        if self.size.x > 0.0 && self.size.y > 0.0 {
            self.size.x / self.size.y
        } else {
            1.0
        }
    }
}

/// Set by the surrounding UI when its panels sit under the pointer or own
/// the keyboard. World input is ignored while set.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiPointerCapture {
    pub wants_pointer: bool,
    pub wants_keyboard: bool,
}

pub fn track_viewport(
    mut resized: EventReader<WindowResized>,
    windows: Query<Entity, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
) {
    let Ok(primary) = windows.get_single() else {
        resized.clear();
        return;
    };
    for event in resized.read() {
        if event.window == primary {
            viewport.size = Vec2::new(event.width, event.height);
        }
    }
}

/// Per-system memory of raw pointer positions between frames.
#[derive(Default)]
pub struct PointerTracking {
    cursor: Option<Vec2>,
    primary_touch: Option<u64>,
}

/// Feed mouse, wheel and touch input to the orbit controller and record the
/// pointer position for picking.
///
/// Presses are handled before moves and releases after them, so a press and
/// a drag arriving in the same frame start from the pre-move position.
pub fn collect_pointer_input(
    mut buttons: EventReader<MouseButtonInput>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut cursor_left: EventReader<CursorLeft>,
    mut wheel: EventReader<MouseWheel>,
    mut touches: EventReader<TouchInput>,
    capture: Res<UiPointerCapture>,
    viewport: Res<Viewport>,
    mut tracking: Local<PointerTracking>,
    mut pointer: ResMut<PointerState>,
    mut orbit: ResMut<OrbitController>,
) {
    let mut releases = Vec::new();
    for event in buttons.read() {
        if event.button != MouseButton::Left {
            continue;
        }
        match event.state {
            ButtonState::Pressed => {
                if capture.wants_pointer {
                    continue;
                }
                let Some(position) = tracking.cursor else {
                    continue;
                };
                orbit.apply(
                    &mut pointer,
                    PointerEvent::Down {
                        pointer: PointerId::Mouse,
                        primary: true,
                        position,
                    },
                );
            }
            ButtonState::Released => releases.push(PointerEvent::Up {
                pointer: PointerId::Mouse,
            }),
        }
    }

    for event in cursor_moved.read() {
        tracking.cursor = Some(event.position);
        pointer.ndc = viewport_to_ndc(event.position, viewport.size);
        orbit.apply(
            &mut pointer,
            PointerEvent::Move {
                pointer: PointerId::Mouse,
                position: event.position,
            },
        );
    }
    if cursor_left.read().count() > 0 {
        tracking.cursor = None;
        pointer.ndc = None;
    }

    for event in touches.read() {
        let id = PointerId::Touch(event.id);
        match event.phase {
            TouchPhase::Started => {
                let primary = tracking.primary_touch.is_none() && !capture.wants_pointer;
                if primary {
                    tracking.primary_touch = Some(event.id);
                    pointer.ndc = viewport_to_ndc(event.position, viewport.size);
                }
                orbit.apply(
                    &mut pointer,
                    PointerEvent::Down {
                        pointer: id,
                        primary,
                        position: event.position,
                    },
                );
            }
            TouchPhase::Moved => {
                if tracking.primary_touch == Some(event.id) {
                    pointer.ndc = viewport_to_ndc(event.position, viewport.size);
                }
                orbit.apply(
                    &mut pointer,
                    PointerEvent::Move {
                        pointer: id,
                        position: event.position,
                    },
                );
            }
            TouchPhase::Ended | TouchPhase::Canceled => {
                if tracking.primary_touch == Some(event.id) {
                    tracking.primary_touch = None;
                }
                releases.push(PointerEvent::Up { pointer: id });
            }
        }
    }

    for release in releases {
        orbit.apply(&mut pointer, release);
    }

    for event in wheel.read() {
        if capture.wants_pointer {
            continue;
        }
        let pixels = match event.unit {
            MouseScrollUnit::Line => event.y * WHEEL_LINE_PIXELS,
            MouseScrollUnit::Pixel => event.y,
        };
        // Scrolling up (positive y) zooms in.
        orbit.apply(&mut pointer, PointerEvent::Wheel { delta: -pixels });
    }
}

/// `R` resets the camera, `D` toggles the debug readout.
pub fn handle_navigator_keys(
    keys: Res<ButtonInput<KeyCode>>,
    capture: Res<UiPointerCapture>,
    mut orbit: ResMut<OrbitController>,
    mut pointer: ResMut<PointerState>,
    mut overlay: ResMut<DebugOverlay>,
) {
    if capture.wants_keyboard {
        return;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        orbit.apply(&mut pointer, PointerEvent::Reset);
        debug!("Camera reset to default view");
    }
    if keys.just_pressed(KeyCode::KeyD) {
        overlay.toggle();
    }
}

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::config::{
    DEFAULT_DISTANCE, DEFAULT_PHI, DEFAULT_THETA, MAX_DISTANCE, MIN_DISTANCE, ORBIT_SENSITIVITY,
    PHI_EPSILON, WHEEL_SENSITIVITY,
};

/// Spherical camera around the world origin.
///
/// `phi` is the polar angle from +Y, `theta` the azimuth in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub theta: f32,
    pub phi: f32,
    pub distance: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            theta: DEFAULT_THETA,
            phi: DEFAULT_PHI,
            distance: DEFAULT_DISTANCE,
        }
    }
}

impl CameraState {
    /// `distance * (sin φ cos θ, cos φ, sin φ sin θ)`.
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.phi.sin() * self.theta.cos(),
            self.distance * self.phi.cos(),
            self.distance * self.phi.sin() * self.theta.sin(),
        )
    }

    /// Camera transform looking at the origin with +Y up.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(Vec3::ZERO, Vec3::Y)
    }

    pub fn is_within_limits(&self) -> bool {
        (PHI_EPSILON..=PI - PHI_EPSILON).contains(&self.phi)
            && (MIN_DISTANCE..=MAX_DISTANCE).contains(&self.distance)
            && self.theta.is_finite()
    }
}

/// Identifies the device behind a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

/// Where an in-progress drag was last sampled, and by whom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub pointer: PointerId,
    /// Last sampled position in logical pixels.
    pub last: Vec2,
}

/// Pointer state shared between input handling and picking.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PointerState {
    /// Last pointer position in normalized device coordinates, if the pointer
    /// is over the viewport.
    pub ndc: Option<Vec2>,
    /// Present while the owning pointer drags the camera.
    pub drag: Option<DragAnchor>,
}

impl PointerState {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

/// Input the orbit controller understands. Positions are logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        pointer: PointerId,
        primary: bool,
        position: Vec2,
    },
    Move {
        pointer: PointerId,
        position: Vec2,
    },
    Up {
        pointer: PointerId,
    },
    /// Scroll amount in pixels; positive zooms out.
    Wheel {
        delta: f32,
    },
    Reset,
}

/// Sole owner of [`CameraState`]; turns pointer input into camera motion.
///
/// Every mutation goes through [`OrbitController::apply`], which clamps the
/// state before returning, so an out-of-range camera is never observable.
#[derive(Resource, Debug, Clone, Default)]
pub struct OrbitController {
    camera: CameraState,
}

impl OrbitController {
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn apply(&mut self, pointer: &mut PointerState, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                pointer: id,
                primary,
                position,
            } => {
                if !primary || pointer.drag.is_some() || !is_finite(position) {
                    return;
                }
                pointer.drag = Some(DragAnchor {
                    pointer: id,
                    last: position,
                });
            }
            PointerEvent::Move {
                pointer: id,
                position,
            } => {
                let Some(anchor) = pointer.drag.as_mut() else {
                    return;
                };
                if anchor.pointer != id || !is_finite(position) {
                    return;
                }
                let delta = position - anchor.last;
                anchor.last = position;
                self.rotate(delta);
            }
            PointerEvent::Up { pointer: id } => {
                if pointer.drag.is_some_and(|anchor| anchor.pointer == id) {
                    pointer.drag = None;
                }
            }
            PointerEvent::Wheel { delta } => self.zoom(delta),
            PointerEvent::Reset => self.camera = CameraState::default(),
        }
    }

    fn rotate(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.camera.theta -= delta.x * ORBIT_SENSITIVITY;
        self.camera.phi =
            (self.camera.phi - delta.y * ORBIT_SENSITIVITY).clamp(PHI_EPSILON, PI - PHI_EPSILON);
    }

    fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() || delta == 0.0 {
            return;
        }
        self.camera.distance =
            (self.camera.distance + delta * WHEEL_SENSITIVITY).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

fn is_finite(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

/// Pixel position to normalized device coordinates (+y up). `None` for an
/// empty viewport or a non-finite position.
pub fn viewport_to_ndc(position: Vec2, viewport: Vec2) -> Option<Vec2> {
    if !(viewport.x > 0.0 && viewport.y > 0.0) || !is_finite(position) {
        return None;
    }
    Some(Vec2::new(
        position.x / viewport.x * 2.0 - 1.0,
        -(position.y / viewport.y * 2.0 - 1.0),
    ))
}

/// One-line camera readout for the debug overlay.
pub fn debug_readout(camera: &CameraState) -> String {
    format!(
        "Camera: θ={:.1}° φ={:.1}° dist={:.1}",
        camera.theta.to_degrees(),
        camera.phi.to_degrees(),
        camera.distance
    )
}

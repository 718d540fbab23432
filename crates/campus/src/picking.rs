//! Pointer picking: rays through the camera, box intersection and the hover
//! enter/exit state machine.

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::math::{Dir3, Ray3d};
use bevy::prelude::*;

use crate::camera::CameraState;

/// Ray from the orbit camera through a point in normalized device coordinates
/// (`-1..1`, +y up), for a perspective camera with vertical field of view
/// `fov_y` and the given aspect ratio. `None` if the direction degenerates.
pub fn pick_ray(camera: &CameraState, ndc: Vec2, fov_y: f32, aspect: f32) -> Option<Ray3d> {
    let transform = camera.transform();
    let half_height = (fov_y * 0.5).tan();
    let half_width = half_height * aspect;
    let direction = transform.forward().as_vec3()
        + transform.right().as_vec3() * (ndc.x * half_width)
        + transform.up().as_vec3() * (ndc.y * half_height);
    Some(Ray3d {
        origin: transform.translation,
        direction: Dir3::new(direction).ok()?,
    })
}

/// Index of a building in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildingId(pub usize);

/// Nearest surface hit by `ray`. Equal distances resolve to the first surface
/// in iteration order; a ray starting inside a box hits it at distance 0.
pub fn nearest_hit<I>(ray: Ray3d, surfaces: I) -> Option<(BuildingId, f32)>
where
    I: IntoIterator<Item = (BuildingId, Aabb3d)>,
{
    let cast = RayCast3d::from_ray(ray, f32::MAX);
    let mut best: Option<(BuildingId, f32)> = None;
    for (id, bounds) in surfaces {
        let Some(t) = cast.aabb_intersection_at(&bounds) else {
            continue;
        };
        match best {
            Some((_, best_t)) if best_t <= t => {}
            _ => best = Some((id, t)),
        }
    }
    best
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    NoHover,
    Hovering(BuildingId),
}

/// What changed in one tick. Apply `exited` before `entered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverStep {
    pub exited: Option<BuildingId>,
    pub entered: Option<BuildingId>,
}

impl HoverStep {
    pub fn is_empty(&self) -> bool {
        self.exited.is_none() && self.entered.is_none()
    }
}

/// Hover state machine fed with the nearest hit every tick.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    state: HoverState,
}

impl HoverTracker {
    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn hovered(&self) -> Option<BuildingId> {
        match self.state {
            HoverState::NoHover => None,
            HoverState::Hovering(id) => Some(id),
        }
    }

    /// Advance with this tick's pick result. Staying on the same building is
    /// a no-op; switching buildings exits the old one and enters the new one
    /// as two separate steps.
    pub fn observe(&mut self, hit: Option<BuildingId>) -> HoverStep {
        let mut step = HoverStep::default();
        if let HoverState::Hovering(current) = self.state {
            if hit == Some(current) {
                return step;
            }
            step.exited = Some(current);
            self.state = HoverState::NoHover;
        }
        if let Some(id) = hit {
            step.entered = Some(id);
            self.state = HoverState::Hovering(id);
        }
        step
    }

    /// Leave any hovered building, e.g. on scene teardown.
    pub fn clear(&mut self) -> Option<BuildingId> {
        let previous = self.hovered();
        self.state = HoverState::NoHover;
        previous
    }
}

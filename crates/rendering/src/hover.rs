//! Per-tick pointer picking and the hover display payload.
//!
//! Hover entry highlights the building and resolves its occupancy exactly
//! once; hover exit restores the building and clears the payload. Remote
//! occupancy arrives later through [`poll_occupancy_fetches`] and is applied
//! only if the hover it was requested for is still current.

use bevy::prelude::*;
use bevy::tasks::{block_on, Task};
use futures_lite::future;

use campus::camera::{OrbitController, PointerState};
use campus::clock::WallClock;
use campus::config::CAMERA_FOV_DEGREES;
use campus::occupancy::{spawn_fetch, FetchLedger, FetchOutcome, OccupancySource};
use campus::picking::{nearest_hit, pick_ray, BuildingId, HoverState, HoverTracker};
use campus::schedule::resolve;
use campus::{CampusData, NavigatorSettings, OccupancyStatus};

use crate::building_registry::{BuildingRegistry, BuildingRoot};
use crate::input::{UiPointerCapture, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub enum Occupancy {
    /// A remote request is in flight.
    Pending,
    Ready(OccupancyStatus),
}

/// What the surrounding panel shows for the hovered building.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverPayload {
    pub building: String,
    pub description: String,
    pub occupancy: Occupancy,
}

/// The one outward data channel of the navigator. `None` while nothing is
/// hovered.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct HoveredBuilding(pub Option<HoverPayload>);

/// Hover state machine, fetch bookkeeping and counters.
#[derive(Resource, Default)]
pub struct HoverPicking {
    tracker: HoverTracker,
    ledger: FetchLedger,
    in_flight: Vec<Task<FetchOutcome>>,
    entries: u64,
    exits: u64,
    discarded: u64,
}

impl HoverPicking {
    pub fn state(&self) -> HoverState {
        self.tracker.state()
    }

    /// Hover entries so far; each one resolved occupancy once.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn exits(&self) -> u64 {
        self.exits
    }

    /// Remote results thrown away because the hover had moved on.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

/// Pointer position to the nearest building under it, if any.
fn pick(
    pointer: &PointerState,
    viewport: &Viewport,
    orbit: &OrbitController,
    registry: &BuildingRegistry,
) -> Option<BuildingId> {
    let ndc = pointer.ndc?;
    let ray = pick_ray(
        orbit.camera(),
        ndc,
        CAMERA_FOV_DEGREES.to_radians(),
        viewport.aspect(),
    )?;
    nearest_hit(ray, registry.pickable_surfaces()).map(|(id, _)| id)
}

pub fn pick_hovered_building(
    pointer: Res<PointerState>,
    viewport: Res<Viewport>,
    orbit: Res<OrbitController>,
    capture: Res<UiPointerCapture>,
    data: Res<CampusData>,
    settings: Res<NavigatorSettings>,
    clock: Res<WallClock>,
    mut registry: ResMut<BuildingRegistry>,
    mut picking: ResMut<HoverPicking>,
    mut hovered: ResMut<HoveredBuilding>,
    mut roots: Query<&mut Transform, With<BuildingRoot>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let hit = if capture.wants_pointer {
        None
    } else {
        pick(&pointer, &viewport, &orbit, &registry)
    };

    let picking = &mut *picking;
    let step = picking.tracker.observe(hit);
    if step.is_empty() {
        return;
    }

    // Exit is applied in full before any entry.
    if let Some(id) = step.exited {
        registry.set_hover(id, false, &mut roots, &mut materials);
        picking.ledger.end();
        picking.exits += 1;
        hovered.0 = None;
        if let Some(building) = registry.get(id) {
            debug!("Hover left '{}'", building.descriptor.name);
        }
    }

    if let Some(id) = step.entered {
        registry.set_hover(id, true, &mut roots, &mut materials);
        let Some(name) = registry.get(id).map(|b| b.descriptor.name.clone()) else {
            return;
        };

        let occupancy = match &settings.occupancy {
            OccupancySource::Timetable => {
                Occupancy::Ready(resolve(data.timetable.entries(&name), clock.now()))
            }
            OccupancySource::Remote(transport) => {
                let ticket = picking.ledger.begin(&name);
                let watch = picking.ledger.watch();
                picking.in_flight.push(spawn_fetch(transport.clone(), ticket, watch));
                Occupancy::Pending
            }
        };
        picking.entries += 1;
        debug!("Hover entered '{}': {:?}", name, occupancy);

        hovered.0 = Some(HoverPayload {
            description: data.description(&name).to_string(),
            building: name,
            occupancy,
        });
    }
}

/// Collect finished remote requests; results for a hover that has ended or
/// moved on are dropped.
pub fn poll_occupancy_fetches(
    mut picking: ResMut<HoverPicking>,
    mut hovered: ResMut<HoveredBuilding>,
) {
    if picking.in_flight.is_empty() {
        return;
    }
    let picking = &mut *picking;

    let mut finished = Vec::new();
    picking.in_flight.retain_mut(|task| {
        match block_on(future::poll_once(task)) {
            Some(outcome) => {
                finished.push(outcome);
                false
            }
            None => true,
        }
    });

    for outcome in finished {
        if !picking.ledger.accepts(&outcome.ticket) {
            picking.discarded += 1;
            debug!(
                "Discarding stale occupancy for '{}' (hover {})",
                outcome.ticket.building, outcome.ticket.generation
            );
            continue;
        }
        let Some(status) = outcome.status else {
            continue;
        };
        if let Some(payload) = hovered
            .0
            .as_mut()
            .filter(|payload| payload.building == outcome.ticket.building)
        {
            payload.occupancy = Occupancy::Ready(status);
        }
    }
}

use bevy::prelude::*;

use campus::camera::{debug_readout, OrbitController};

/// Camera readout for the surrounding UI to show. Derived state only; the
/// scene never draws it.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct DebugOverlay {
    pub enabled: bool,
    pub readout: Option<String>,
}

impl DebugOverlay {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            readout: None,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        debug!(
            "Debug readout {}",
            if self.enabled { "shown" } else { "hidden" }
        );
    }
}

pub fn refresh_debug_readout(orbit: Res<OrbitController>, mut overlay: ResMut<DebugOverlay>) {
    let readout = overlay.enabled.then(|| debug_readout(orbit.camera()));
    if overlay.readout != readout {
        overlay.readout = readout;
    }
}

use std::sync::Arc;

use bevy::prelude::*;

use crate::occupancy::{FetchError, OccupancySource};

/// Runtime options chosen by the host before the navigator mounts.
#[derive(Resource, Debug, Clone, Default)]
pub struct NavigatorSettings {
    pub occupancy: OccupancySource,
    /// Initial visibility of the camera readout.
    pub show_debug: bool,
}

impl NavigatorSettings {
    pub fn with_remote_status(mut self, base_url: &str) -> Result<Self, FetchError> {
        self.occupancy = remote_source(base_url)?;
        Ok(self)
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.occupancy, OccupancySource::Remote(_))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn remote_source(base_url: &str) -> Result<OccupancySource, FetchError> {
    let transport = crate::occupancy::HttpStatusTransport::new(base_url)?;
    Ok(OccupancySource::Remote(Arc::new(transport)))
}

#[cfg(target_arch = "wasm32")]
fn remote_source(base_url: &str) -> Result<OccupancySource, FetchError> {
    crate::occupancy::status_url(base_url, "HOD")?;
    warn!("Remote occupancy requested but no HTTP transport on this target; every hover reads 'No Session'");
    Ok(OccupancySource::Remote(Arc::new(
        |_: &str| -> Result<crate::occupancy::StatusReply, FetchError> { Err(FetchError::Unsupported) },
    )))
}

//! Remote occupancy: asks an external status service instead of the static
//! timetable, and folds every failure into the same "no session" shape.
//!
//! Requests run on Bevy's `IoTaskPool`. Each one carries a [`FetchTicket`];
//! the [`FetchLedger`] decides whether a finished request still describes the
//! building under the pointer. A request whose hover is already over by the
//! time the pool gets to it is skipped without touching the transport.

mod reply;
mod transport;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};

use crate::schedule::{OccupancyStatus, NO_LECTURER};

pub use reply::{StatusReply, STATUS_OCCUPIED};
#[cfg(not(target_arch = "wasm32"))]
pub use transport::HttpStatusTransport;
pub use transport::{decode_reply, status_url, FetchError, StatusTransport};

/// Subject used whenever the remote service cannot say anything better.
pub const NO_SESSION: &str = "No Session";

/// The fallback for errors, malformed replies and unknown buildings.
pub fn no_session() -> OccupancyStatus {
    OccupancyStatus {
        is_occupied: false,
        subject: NO_SESSION.to_string(),
        lecturer: NO_LECTURER.to_string(),
        progress_percent: None,
        eta_minutes: None,
        window: None,
    }
}

/// Map a reply (or failure) onto an [`OccupancyStatus`]. Never fails.
///
/// - `status == "Occupied"` with a subject: occupied, lecturer defaults to N/A.
/// - any other status: free, subject is the `next` label or "No Session".
/// - errors, `{error}` bodies, a missing status or an occupied reply without
///   a subject: the [`no_session`] fallback.
pub fn normalize(result: Result<StatusReply, FetchError>) -> OccupancyStatus {
    let Ok(reply) = result else {
        return no_session();
    };
    if reply.error.is_some() {
        return no_session();
    }
    let Some(status) = reply.status else {
        return no_session();
    };
    if status == STATUS_OCCUPIED {
        let Some(subject) = reply.subject.filter(|s| !s.is_empty()) else {
            return no_session();
        };
        return OccupancyStatus {
            is_occupied: true,
            subject,
            lecturer: reply
                .lecturer
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| NO_LECTURER.to_string()),
            progress_percent: None,
            eta_minutes: None,
            window: None,
        };
    }
    OccupancyStatus {
        subject: reply
            .next
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| NO_SESSION.to_string()),
        ..no_session()
    }
}

/// Query `transport` for `building` and normalize the answer. Failures are
/// logged and replaced by the fallback.
pub fn fetch_status(transport: &dyn StatusTransport, building: &str) -> OccupancyStatus {
    let result = transport.get_status(building).and_then(|reply| match reply.error {
        Some(ref msg) => Err(FetchError::Service(msg.clone())),
        None => Ok(reply),
    });
    if let Err(ref e) = result {
        warn!("Occupancy for '{}' unavailable: {}", building, e);
    }
    normalize(result)
}

/// Identity of one request: which building, and for which hover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub building: String,
    pub generation: u64,
}

/// Result of a finished request. `status` is `None` when the request was
/// skipped because its hover had already ended.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub status: Option<OccupancyStatus>,
}

/// Read-only handle on a ledger's generation, shared with running requests.
#[derive(Debug, Clone, Default)]
pub struct GenerationWatch(Arc<AtomicU64>);

impl GenerationWatch {
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.0.load(Ordering::Acquire) == ticket.generation
    }

    fn publish(&self, generation: u64) {
        self.0.store(generation, Ordering::Release);
    }
}

/// Tracks the hover the next result must belong to.
///
/// The generation advances on every hover entry and exit, so a result issued
/// for an earlier hover of the *same* building is stale too.
#[derive(Debug, Default)]
pub struct FetchLedger {
    generation: u64,
    current: Option<FetchTicket>,
    watch: GenerationWatch,
}

impl FetchLedger {
    /// A new hover began on `building`; returns the ticket for its request.
    pub fn begin(&mut self, building: &str) -> FetchTicket {
        self.generation += 1;
        self.watch.publish(self.generation);
        let ticket = FetchTicket {
            building: building.to_string(),
            generation: self.generation,
        };
        self.current = Some(ticket.clone());
        ticket
    }

    /// The hover ended; every outstanding ticket is stale from now on.
    pub fn end(&mut self) {
        self.generation += 1;
        self.watch.publish(self.generation);
        self.current = None;
    }

    /// Handle for requests to check their ticket against while queued.
    pub fn watch(&self) -> GenerationWatch {
        self.watch.clone()
    }

    pub fn current(&self) -> Option<&FetchTicket> {
        self.current.as_ref()
    }

    pub fn accepts(&self, ticket: &FetchTicket) -> bool {
        self.current.as_ref() == Some(ticket)
    }
}

/// Where hover occupancy comes from.
#[derive(Clone, Default)]
pub enum OccupancySource {
    /// Resolve against the static timetable.
    #[default]
    Timetable,
    /// Ask a remote status service.
    Remote(Arc<dyn StatusTransport>),
}

impl std::fmt::Debug for OccupancySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OccupancySource::Timetable => write!(f, "Timetable"),
            OccupancySource::Remote(_) => write!(f, "Remote"),
        }
    }
}

/// Run a request on the IO task pool. Requests queue behind each other, so
/// the ticket is checked against `watch` once the pool picks it up.
pub fn spawn_fetch(
    transport: Arc<dyn StatusTransport>,
    ticket: FetchTicket,
    watch: GenerationWatch,
) -> Task<FetchOutcome> {
    IoTaskPool::get().spawn(async move {
        if !watch.is_current(&ticket) {
            debug!(
                "Skipping occupancy request for '{}' (hover {} is over)",
                ticket.building, ticket.generation
            );
            return FetchOutcome {
                ticket,
                status: None,
            };
        }
        let status = fetch_status(transport.as_ref(), &ticket.building);
        FetchOutcome {
            ticket,
            status: Some(status),
        }
    })
}

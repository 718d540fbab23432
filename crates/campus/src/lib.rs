//! Campus navigator core: everything that can be decided without a GPU.
//!
//! Building descriptors and timetables, the schedule resolver, the remote
//! occupancy fetcher, orbit camera math, pointer picking and the hover state
//! machine. The `rendering` crate drives these once per frame.

pub mod building;
pub mod camera;
pub mod campus_data;
pub mod clock;
pub mod config;
pub mod occupancy;
pub mod picking;
pub mod schedule;
pub mod settings;
pub mod timetable;

pub use building::{BuildingDescriptor, BuildingVisual, Rgb};
pub use campus_data::{CampusData, CampusDataError};
pub use schedule::{resolve, OccupancyStatus, Timestamp};
pub use settings::NavigatorSettings;

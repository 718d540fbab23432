use bevy::prelude::*;
use chrono::{Datelike, Local, Timelike};

use crate::schedule::Timestamp;

/// Source of "now" for schedule resolution.
///
/// The resolver never reads the clock itself; hover handling asks this
/// resource once per hover entry and passes the result in.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WallClock {
    /// Local time of the machine running the navigator.
    #[default]
    Local,
    /// A frozen instant, for tests and demos.
    Fixed(Timestamp),
}

impl WallClock {
    pub fn now(&self) -> Timestamp {
        match self {
            WallClock::Local => {
                let now = Local::now();
                Timestamp::new(
                    now.weekday().num_days_from_sunday() as u8,
                    now.hour() as u8,
                    now.minute() as u8,
                )
            }
            WallClock::Fixed(ts) => *ts,
        }
    }
}

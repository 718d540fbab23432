//! Schedule resolution: given a building's sessions and a point in time,
//! decide whether a class is in session or which one comes next.
//!
//! Everything here is a pure function of its arguments. The caller supplies
//! `now` (see [`crate::clock::WallClock`]) so results are reproducible.

use serde::{Deserialize, Serialize};

use crate::timetable::TimetableEntry;

/// Subject shown when nothing else is scheduled for the rest of the day.
pub const NO_FURTHER_SESSIONS: &str = "No further sessions today";
/// Lecturer shown when a session (or remote reply) has none.
pub const NO_LECTURER: &str = "N/A";

/// A day-of-week and wall-clock time with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    pub hours: u8,
    pub minutes: u8,
}

impl Timestamp {
    pub fn new(day_of_week: u8, hours: u8, minutes: u8) -> Self {
        Self {
            day_of_week,
            hours,
            minutes,
        }
    }

    /// `hours + minutes / 60`.
    pub fn fractional_hours(&self) -> f32 {
        self.hours as f32 + self.minutes as f32 / 60.0
    }
}

/// Start and end of a session, in fractional hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub start: f32,
    pub end: f32,
}

impl SessionWindow {
    /// `HH:MM - HH:MM`.
    pub fn label(&self) -> String {
        format!("{} - {}", format_time(self.start), format_time(self.end))
    }
}

/// Derived occupancy of one building at one instant. Never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyStatus {
    pub is_occupied: bool,
    pub subject: String,
    pub lecturer: String,
    /// Elapsed share of the current session, `0..=100`. Only when occupied.
    pub progress_percent: Option<f32>,
    /// Minutes until the next session starts. Only when one is upcoming today.
    pub eta_minutes: Option<i32>,
    /// Time window of the reported session, when known.
    pub window: Option<SessionWindow>,
}

impl OccupancyStatus {
    pub fn no_further_sessions() -> Self {
        Self {
            is_occupied: false,
            subject: NO_FURTHER_SESSIONS.to_string(),
            lecturer: NO_LECTURER.to_string(),
            progress_percent: None,
            eta_minutes: None,
            window: None,
        }
    }

    /// Countdown text for an upcoming session, e.g. `in 1h 5m`.
    pub fn countdown(&self) -> Option<String> {
        self.eta_minutes.map(format_countdown)
    }
}

/// Resolve the occupancy of a building from its sessions.
///
/// - A session is current when it is on the same day and `start <= t <= end`.
///   Overlaps pick the smallest `start`, then input order.
/// - Otherwise the earliest same-day session with `start > t` is reported as
///   upcoming, with an ETA in whole minutes.
/// - Otherwise the "no further sessions" sentinel is returned.
pub fn resolve(entries: &[TimetableEntry], now: Timestamp) -> OccupancyStatus {
    let day = now.day_of_week;
    let t = now.fractional_hours();

    let current = entries
        .iter()
        .filter(|e| e.day_of_week == day && e.start <= t && t <= e.end)
        .min_by(|a, b| a.start.total_cmp(&b.start));

    if let Some(session) = current {
        return OccupancyStatus {
            is_occupied: true,
            subject: session.subject.clone(),
            lecturer: lecturer_of(session),
            progress_percent: Some(progress_percent(session, t)),
            eta_minutes: None,
            window: Some(window_of(session)),
        };
    }

    let next = entries
        .iter()
        .filter(|e| e.day_of_week == day && e.start > t)
        .min_by(|a, b| a.start.total_cmp(&b.start));

    match next {
        Some(session) => OccupancyStatus {
            is_occupied: false,
            subject: session.subject.clone(),
            lecturer: lecturer_of(session),
            progress_percent: None,
            eta_minutes: Some(((session.start - t) * 60.0).round() as i32),
            window: Some(window_of(session)),
        },
        None => OccupancyStatus::no_further_sessions(),
    }
}

fn lecturer_of(entry: &TimetableEntry) -> String {
    entry
        .lecturer
        .clone()
        .unwrap_or_else(|| NO_LECTURER.to_string())
}

fn window_of(entry: &TimetableEntry) -> SessionWindow {
    SessionWindow {
        start: entry.start,
        end: entry.end,
    }
}

/// Elapsed share of `entry` at `t`, clamped to `0..=100`.
///
/// A zero-length session can only match at its single instant and counts as
/// complete.
pub fn progress_percent(entry: &TimetableEntry, t: f32) -> f32 {
    let span = entry.end - entry.start;
    if span.is_nan() || span <= 0.0 {
        return 100.0;
    }
    ((t - entry.start) / span * 100.0).clamp(0.0, 100.0)
}

/// Format fractional hours as zero-padded `HH:MM`.
pub fn format_time(t: f32) -> String {
    let mut hours = t.floor() as i32;
    let mut minutes = ((t - hours as f32) * 60.0).round() as i32;
    if minutes >= 60 {
        hours += 1;
        minutes -= 60;
    }
    format!("{:02}:{:02}", hours, minutes)
}

/// `in 1h 5m` for 65 minutes, `in 45m` under an hour.
pub fn format_countdown(eta_minutes: i32) -> String {
    let eta = eta_minutes.max(0);
    let hours = eta / 60;
    let minutes = eta % 60;
    if hours > 0 {
        format!("in {}h {}m", hours, minutes)
    } else {
        format!("in {}m", minutes)
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One scheduled session in a building.
///
/// `start`/`end` are fractional hours (`11.25` is 11:15). Well-formed entries
/// satisfy `0 <= start < end <= 24`; entries that don't are kept and resolved
/// by the schedule resolver's tie-break rules instead of being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lecturer: Option<String>,
    /// 0 = Sunday .. 6 = Saturday.
    #[serde(rename = "day")]
    pub day_of_week: u8,
    pub start: f32,
    pub end: f32,
}

impl TimetableEntry {
    pub fn is_well_formed(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.start >= 0.0
            && self.start < self.end
            && self.end <= 24.0
    }
}

/// Sessions per building, looked up by building name.
#[derive(Debug, Clone, Default)]
pub struct TimetableStore {
    entries: HashMap<String, Vec<TimetableEntry>>,
}

impl TimetableStore {
    pub fn insert(&mut self, building: impl Into<String>, entries: Vec<TimetableEntry>) {
        self.entries.insert(building.into(), entries);
    }

    /// Sessions for `building`; empty for unknown buildings.
    pub fn entries(&self, building: &str) -> &[TimetableEntry] {
        self.entries.get(building).map(Vec::as_slice).unwrap_or(&[])
    }
}

//! Campus configuration: building descriptors, descriptions and timetables,
//! loaded from a JSON document.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::building::{BuildingDescriptor, Rgb};
use crate::timetable::{TimetableEntry, TimetableStore};

/// The campus shipped with the navigator.
const DEFAULT_CAMPUS_JSON: &str = include_str!("../data/campus.json");

#[derive(Debug)]
pub enum CampusDataError {
    Io(std::io::Error),
    Parse(String),
    DuplicateBuilding(String),
    InvalidBuilding { name: String, reason: String },
    InvalidSession { building: String, subject: String, reason: String },
}

impl fmt::Display for CampusDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CampusDataError::Io(e) => write!(f, "I/O error: {e}"),
            CampusDataError::Parse(msg) => write!(f, "Invalid campus JSON: {msg}"),
            CampusDataError::DuplicateBuilding(name) => {
                write!(f, "Building '{name}' is defined more than once")
            }
            CampusDataError::InvalidBuilding { name, reason } => {
                write!(f, "Building '{name}': {reason}")
            }
            CampusDataError::InvalidSession {
                building,
                subject,
                reason,
            } => write!(f, "Session '{subject}' in '{building}': {reason}"),
        }
    }
}

impl std::error::Error for CampusDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CampusDataError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CampusDataError {
    fn from(e: std::io::Error) -> Self {
        CampusDataError::Io(e)
    }
}

impl From<serde_json::Error> for CampusDataError {
    fn from(e: serde_json::Error) -> Self {
        CampusDataError::Parse(e.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CampusFile {
    buildings: Vec<BuildingRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BuildingRecord {
    name: String,
    color: String,
    position: [f32; 3],
    size: [f32; 3],
    #[serde(default)]
    description: String,
    #[serde(default)]
    timetable: Vec<TimetableEntry>,
}

/// Everything the navigator is configured with at construction time.
#[derive(Resource, Debug, Clone, Default)]
pub struct CampusData {
    /// In scene order.
    pub buildings: Vec<BuildingDescriptor>,
    pub descriptions: HashMap<String, String>,
    pub timetable: TimetableStore,
}

impl CampusData {
    pub fn builtin() -> Result<Self, CampusDataError> {
        Self::from_json(DEFAULT_CAMPUS_JSON)
    }

    pub fn load(path: &Path) -> Result<Self, CampusDataError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, CampusDataError> {
        let file: CampusFile = serde_json::from_str(text)?;
        let mut data = CampusData::default();
        let mut seen = HashSet::new();

        for record in file.buildings {
            if !seen.insert(record.name.clone()) {
                return Err(CampusDataError::DuplicateBuilding(record.name));
            }
            let descriptor = descriptor_from(&record)?;
            for entry in &record.timetable {
                validate_session(&record.name, entry)?;
            }
            data.descriptions
                .insert(record.name.clone(), record.description);
            data.timetable.insert(record.name.clone(), record.timetable);
            data.buildings.push(descriptor);
        }

        Ok(data)
    }

    pub fn description(&self, building: &str) -> &str {
        self.descriptions
            .get(building)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn descriptor(&self, building: &str) -> Option<&BuildingDescriptor> {
        self.buildings.iter().find(|b| b.name == building)
    }
}

fn descriptor_from(record: &BuildingRecord) -> Result<BuildingDescriptor, CampusDataError> {
    let invalid = |reason: String| CampusDataError::InvalidBuilding {
        name: record.name.clone(),
        reason,
    };
    if record.name.trim().is_empty() {
        return Err(invalid("name is empty".to_string()));
    }
    let color = Rgb::parse_hex(&record.color)
        .ok_or_else(|| invalid(format!("color '{}' is not #rrggbb", record.color)))?;
    let position = Vec3::from_array(record.position);
    let size = Vec3::from_array(record.size);
    if !position.is_finite() {
        return Err(invalid("position is not finite".to_string()));
    }
    if !size.is_finite() || size.min_element() <= 0.0 {
        return Err(invalid("size must be positive".to_string()));
    }
    Ok(BuildingDescriptor {
        name: record.name.clone(),
        color,
        position,
        size,
    })
}

/// Rejects what can't be resolved at all. Inverted or out-of-range times are
/// kept and only logged; the resolver handles them.
fn validate_session(building: &str, entry: &TimetableEntry) -> Result<(), CampusDataError> {
    if entry.day_of_week > 6 {
        return Err(CampusDataError::InvalidSession {
            building: building.to_string(),
            subject: entry.subject.clone(),
            reason: format!("day {} is outside 0..6", entry.day_of_week),
        });
    }
    if !entry.start.is_finite() || !entry.end.is_finite() {
        return Err(CampusDataError::InvalidSession {
            building: building.to_string(),
            subject: entry.subject.clone(),
            reason: "start and end must be numbers".to_string(),
        });
    }
    if !entry.is_well_formed() {
        warn!(
            "Session '{}' in '{}' runs {}..{}, expected 0 <= start < end <= 24",
            entry.subject, building, entry.start, entry.end
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_campus_loads() {
        let data = CampusData::builtin().expect("embedded campus must parse");
        let names: Vec<&str> = data.buildings.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["HOD", "Block 3", "Block 4", "Block 2", "Block 1"]);
        assert_eq!(data.timetable.entries("Block 3").len(), 13);
        assert_eq!(
            data.description("Block 4"),
            "Physics & Chemistry Labs and Lecture Halls."
        );
        let hod = data.descriptor("HOD").expect("HOD");
        assert_eq!(hod.color, Rgb(0x87ceeb));
        assert_eq!(hod.size, Vec3::new(2.0, 2.5, 2.0));
    }

    #[test]
    fn test_duplicate_building_is_rejected() {
        let json = r##"{"buildings":[
            {"name":"A","color":"#ffffff","position":[0,0,0],"size":[1,1,1]},
            {"name":"A","color":"#000000","position":[2,0,0],"size":[1,1,1]}
        ]}"##;
        let err = CampusData::from_json(json).unwrap_err();
        assert!(matches!(err, CampusDataError::DuplicateBuilding(ref n) if n == "A"));
    }

    #[test]
    fn test_bad_color_and_size_are_rejected() {
        let json = r##"{"buildings":[{"name":"A","color":"red","position":[0,0,0],"size":[1,1,1]}]}"##;
        assert!(matches!(
            CampusData::from_json(json),
            Err(CampusDataError::InvalidBuilding { .. })
        ));
        let json = r##"{"buildings":[{"name":"A","color":"#ff0000","position":[0,0,0],"size":[1,0,1]}]}"##;
        assert!(matches!(
            CampusData::from_json(json),
            Err(CampusDataError::InvalidBuilding { .. })
        ));
    }

    #[test]
    fn test_day_out_of_range_is_rejected() {
        let json = r##"{"buildings":[{"name":"A","color":"#ff0000","position":[0,0,0],"size":[1,1,1],
            "timetable":[{"subject":"X","day":7,"start":9,"end":10}]}]}"##;
        let err = CampusData::from_json(json).unwrap_err();
        assert!(err.to_string().contains("outside 0..6"), "got: {err}");
    }

    #[test]
    fn test_inverted_session_is_kept() {
        let json = r##"{"buildings":[{"name":"A","color":"#ff0000","position":[0,0,0],"size":[1,1,1],
            "timetable":[{"subject":"Backwards","day":1,"start":11,"end":10}]}]}"##;
        let data = CampusData::from_json(json).expect("anomalies degrade, not fail");
        assert_eq!(data.timetable.entries("A").len(), 1);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = CampusData::from_json("{").unwrap_err();
        assert!(matches!(err, CampusDataError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CampusData::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CampusDataError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}

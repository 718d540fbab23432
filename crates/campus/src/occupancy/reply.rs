use serde::{Deserialize, Serialize};

/// Status string the remote service uses for a building in session.
pub const STATUS_OCCUPIED: &str = "Occupied";

/// Body of `GET /api/status/{building}`.
///
/// Every field is optional on the wire; which combination is acceptable is
/// decided by [`super::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lecturer: Option<String>,
    /// Label of the next session when the building is free.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusReply {
    pub fn occupied(subject: &str, lecturer: &str) -> Self {
        Self {
            status: Some(STATUS_OCCUPIED.to_string()),
            subject: Some(subject.to_string()),
            lecturer: Some(lecturer.to_string()),
            ..Default::default()
        }
    }

    pub fn free(next: Option<&str>) -> Self {
        Self {
            status: Some("Free".to_string()),
            next: next.map(str::to_string),
            ..Default::default()
        }
    }
}

use serde::{Deserialize, Serialize};

/// One event on the calendar. Timestamps are epoch seconds; a missing value
/// makes the race ineligible for any time-based selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub race_id: String,
    pub round: u32,
    pub race_name: String,
    pub circuit_id: String,
    #[serde(default)]
    pub circuit_name: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub race_start_time: Option<i64>,
    #[serde(default)]
    pub race_end_time: Option<i64>,
    #[serde(default)]
    pub race_state: String,
    #[serde(default)]
    pub is_sprint: bool,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub podium: Option<Vec<String>>,
}

impl Race {
    pub fn is_upcoming(&self) -> bool {
        self.race_state == "upcoming"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub session_type: String,
    pub session_name: String,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub session_state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: Vec<Race>,
}

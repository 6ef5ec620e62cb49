use serde::Serialize;

use crate::models::{driver::Driver, race::Race, race::Session, slider::HomeSliderItem};

/// Snapshot of one screen as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState<T> {
    pub is_loading: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            data: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl<T> ViewState<T> {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.data.is_some() {
            Phase::Loaded
        } else {
            Phase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

/// The next session together with its local display strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextSession {
    pub session: Session,
    pub date_label: Option<String>,
    pub time_label: Option<String>,
    pub am_pm_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeData {
    pub leading_driver: Option<Driver>,
    pub upcoming_race: Option<Race>,
    pub next_session: Option<NextSession>,
    pub slider: Vec<HomeSliderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailsData {
    pub race: Option<Race>,
    pub next_session: Option<Session>,
    pub session_label: String,
    pub circuit_display_name: Option<String>,
    pub date_range: Option<String>,
    pub countdown_target: Option<i64>,
    pub countdown: Countdown,
}

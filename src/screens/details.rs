use chrono::{DateTime, FixedOffset, Utc};
use std::sync::Arc;
use tracing::info;

use crate::{
    models::{
        error::FetchError,
        race::Race,
        view_state::{Countdown, DetailsData},
    },
    screens::{countdown::CountdownTicker, holder::StateHolder},
    utils::{
        api_client::RaceDataSource,
        race_utils::{
            find_first_practice, format_circuit_id, select_next_session, select_upcoming_race,
            FIRST_PRACTICE,
        },
        time_utils::{compute_countdown, format_date_range, safe_instant, Clock},
    },
};

/// Race weekend screen with its session countdown.
pub struct DetailsScreen {
    source: Arc<dyn RaceDataSource>,
    clock: Arc<dyn Clock>,
    zone: FixedOffset,
    state: StateHolder<DetailsData>,
}

impl DetailsScreen {
    pub fn new(source: Arc<dyn RaceDataSource>, clock: Arc<dyn Clock>, zone: FixedOffset) -> Self {
        Self {
            source,
            clock,
            zone,
            state: StateHolder::new(),
        }
    }

    pub fn state(&self) -> &StateHolder<DetailsData> {
        &self.state
    }

    pub fn refresh(&self) {
        self.state.spawn_refresh(load_details(
            Arc::clone(&self.source),
            Arc::clone(&self.clock),
            self.zone,
        ));
    }

    pub async fn load(&self) {
        self.state
            .refresh(load_details(
                Arc::clone(&self.source),
                Arc::clone(&self.clock),
                self.zone,
            ))
            .await;
    }

    /// Shows a race handed over by another screen, without fetching.
    pub fn show_race(&self, race: Race) {
        info!(race = %race.race_id, "showing race details");
        let data = derive_details(Some(race), self.clock.now(), &self.zone);
        self.state.apply(Ok(data));
    }

    /// Keeps the countdown current until the returned ticker is dropped.
    pub fn start_countdown(&self, period: std::time::Duration) -> CountdownTicker {
        CountdownTicker::start(self.state.data_updater(), Arc::clone(&self.clock), period)
    }

    pub fn teardown(&self) {
        self.state.cancel();
    }
}

async fn load_details(
    source: Arc<dyn RaceDataSource>,
    clock: Arc<dyn Clock>,
    zone: FixedOffset,
) -> Result<DetailsData, FetchError> {
    let schedule = source.fetch_schedule().await?.schedule;
    let now = clock.now();
    let race = select_upcoming_race(&schedule, now).cloned();
    Ok(derive_details(race, now, &zone))
}

pub fn derive_details(race: Option<Race>, now: DateTime<Utc>, zone: &FixedOffset) -> DetailsData {
    let Some(race) = race else {
        return DetailsData {
            race: None,
            next_session: None,
            session_label: FIRST_PRACTICE.to_string(),
            circuit_display_name: None,
            date_range: None,
            countdown_target: None,
            countdown: Countdown::default(),
        };
    };

    let next_session = select_next_session(&race.sessions, now).cloned();
    let first_practice = find_first_practice(&race);

    let session_label = next_session
        .as_ref()
        .or(first_practice)
        .map(|session| session.session_name.clone())
        .unwrap_or_else(|| FIRST_PRACTICE.to_string());

    let countdown_target = match &next_session {
        Some(session) => session.start_time,
        None => first_practice.and_then(|session| session.start_time),
    }
    .filter(|secs| safe_instant(Some(*secs)).is_some());

    DetailsData {
        next_session,
        session_label,
        circuit_display_name: Some(format_circuit_id(&race.circuit_id)),
        date_range: format_date_range(race.race_start_time, race.race_end_time, zone),
        countdown: countdown_for(countdown_target, now),
        countdown_target,
        race: Some(race),
    }
}

pub fn countdown_for(target: Option<i64>, now: DateTime<Utc>) -> Countdown {
    safe_instant(target)
        .map(|target| compute_countdown(target, now))
        .unwrap_or_default()
}

use chrono::FixedOffset;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    models::{
        driver::Driver,
        error::FetchError,
        race::Race,
        view_state::{HomeData, NextSession},
    },
    screens::holder::StateHolder,
    utils::{
        api_client::RaceDataSource,
        driver_utils::{home_slider_items, select_leading_driver},
        race_utils::{select_next_session, select_upcoming_race},
        time_utils::{
            format_session_am_pm_label, format_session_date_label, format_session_time_label,
            Clock,
        },
    },
};

/// Landing screen: championship leader, upcoming race and its next session.
pub struct HomeScreen {
    source: Arc<dyn RaceDataSource>,
    clock: Arc<dyn Clock>,
    zone: FixedOffset,
    state: StateHolder<HomeData>,
}

impl HomeScreen {
    pub fn new(source: Arc<dyn RaceDataSource>, clock: Arc<dyn Clock>, zone: FixedOffset) -> Self {
        Self {
            source,
            clock,
            zone,
            state: StateHolder::new(),
        }
    }

    pub fn state(&self) -> &StateHolder<HomeData> {
        &self.state
    }

    /// Triggers a background refresh.
    pub fn refresh(&self) {
        self.state.spawn_refresh(load_home(
            Arc::clone(&self.source),
            Arc::clone(&self.clock),
            self.zone,
        ));
    }

    /// Refreshes and waits for the outcome to be published.
    pub async fn load(&self) {
        self.state
            .refresh(load_home(
                Arc::clone(&self.source),
                Arc::clone(&self.clock),
                self.zone,
            ))
            .await;
    }

    pub fn teardown(&self) {
        self.state.cancel();
    }
}

async fn load_home(
    source: Arc<dyn RaceDataSource>,
    clock: Arc<dyn Clock>,
    zone: FixedOffset,
) -> Result<HomeData, FetchError> {
    let (drivers, schedule) = tokio::join!(source.fetch_drivers(), source.fetch_schedule());
    let (drivers, schedule) = match (drivers, schedule) {
        (Ok(drivers), Ok(schedule)) => (drivers.drivers, schedule.schedule),
        (Err(error), other) => {
            if other.is_ok() {
                warn!("schedule fetched but drivers failed, discarding schedule");
            }
            return Err(error);
        }
        (Ok(_), Err(error)) => {
            warn!("drivers fetched but schedule failed, discarding drivers");
            return Err(error);
        }
    };

    let data = derive_home(
        select_leading_driver(&drivers).cloned(),
        &schedule,
        clock.as_ref(),
        &zone,
    );
    info!(
        leader = data.leading_driver.as_ref().map(|d| d.driver_id.as_str()),
        race = data.upcoming_race.as_ref().map(|r| r.race_id.as_str()),
        "home data refreshed"
    );
    Ok(data)
}

fn derive_home(
    leading_driver: Option<Driver>,
    schedule: &[Race],
    clock: &dyn Clock,
    zone: &FixedOffset,
) -> HomeData {
    let now = clock.now();
    let upcoming_race = select_upcoming_race(schedule, now).cloned();
    let next_session = upcoming_race
        .as_ref()
        .and_then(|race| select_next_session(&race.sessions, now))
        .map(|session| NextSession {
            date_label: format_session_date_label(session, zone),
            time_label: format_session_time_label(session, zone),
            am_pm_label: format_session_am_pm_label(session, zone),
            session: session.clone(),
        });

    HomeData {
        slider: home_slider_items(leading_driver.as_ref()),
        leading_driver,
        upcoming_race,
        next_session,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::view_state::Phase,
        test_support::{driver, race, session, FakeSource},
        utils::time_utils::FixedClock,
    };
    use chrono::{DateTime, Utc};

    // 2024-05-04T08:00:00Z
    const SATURDAY_8AM: i64 = 1_714_809_600;

    fn clock_at(secs: i64) -> Arc<dyn Clock> {
        Arc::new(FixedClock(DateTime::<Utc>::from_timestamp(secs, 0).unwrap()))
    }

    fn weekend_source() -> FakeSource {
        let mut monaco = race("monaco", Some(SATURDAY_8AM - 86_400), "upcoming");
        monaco.sessions = vec![
            session("fp1", Some(SATURDAY_8AM - 86_400), Some(SATURDAY_8AM - 82_800)),
            session("qualifying", Some(SATURDAY_8AM), Some(SATURDAY_8AM + 3_600)),
            session("race", Some(SATURDAY_8AM + 86_400), Some(SATURDAY_8AM + 93_600)),
        ];
        FakeSource::new(
            vec![driver("norris", Some(2)), driver("piastri", Some(1))],
            vec![race("spa", Some(SATURDAY_8AM + 30 * 86_400), "scheduled"), monaco],
        )
    }

    #[tokio::test]
    async fn load_derives_leader_race_and_next_session() {
        let screen = HomeScreen::new(
            Arc::new(weekend_source()),
            clock_at(SATURDAY_8AM - 600),
            FixedOffset::east_opt(0).unwrap(),
        );
        screen.load().await;

        let state = screen.state().snapshot();
        assert_eq!(state.phase(), Phase::Loaded);
        let data = state.data.unwrap();
        assert_eq!(data.leading_driver.unwrap().driver_id, "piastri");
        assert_eq!(data.upcoming_race.unwrap().race_id, "monaco");
        let next = data.next_session.unwrap();
        assert_eq!(next.session.session_id, "qualifying");
        assert_eq!(next.date_label.as_deref(), Some("04 Saturday"));
        assert_eq!(next.time_label.as_deref(), Some("8.00"));
        assert_eq!(next.am_pm_label.as_deref(), Some("AM"));
        assert_eq!(data.slider.len(), 2);
    }

    #[tokio::test]
    async fn misses_are_absent_values_not_errors() {
        let source = FakeSource::new(vec![driver("norris", Some(2))], vec![]);
        let screen = HomeScreen::new(
            Arc::new(source),
            clock_at(SATURDAY_8AM),
            FixedOffset::east_opt(0).unwrap(),
        );
        screen.load().await;

        let state = screen.state().snapshot();
        assert_eq!(state.phase(), Phase::Loaded);
        let data = state.data.unwrap();
        assert!(data.leading_driver.is_none());
        assert!(data.upcoming_race.is_none());
        assert!(data.next_session.is_none());
        assert_eq!(data.slider.len(), 1);
    }

    #[tokio::test]
    async fn timeout_fails_and_keeps_previous_payload() {
        let source = Arc::new(weekend_source());
        let screen = HomeScreen::new(
            source.clone(),
            clock_at(SATURDAY_8AM - 600),
            FixedOffset::east_opt(0).unwrap(),
        );
        screen.load().await;
        let before = screen.state().snapshot().data;

        source.fail_schedule_with_timeout();
        screen.load().await;

        let state = screen.state().snapshot();
        assert_eq!(state.phase(), Phase::Failed);
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Could not reach server"));
        assert_eq!(state.data, before);
    }

    #[tokio::test]
    async fn either_fetch_failing_fails_the_refresh() {
        let source = Arc::new(weekend_source());
        source.fail_drivers_with_timeout();
        let screen = HomeScreen::new(
            source,
            clock_at(SATURDAY_8AM),
            FixedOffset::east_opt(0).unwrap(),
        );
        screen.load().await;
        let state = screen.state().snapshot();
        assert_eq!(state.phase(), Phase::Failed);
        assert!(state.data.is_none());
    }

    #[tokio::test]
    async fn background_refresh_publishes() {
        let screen = HomeScreen::new(
            Arc::new(weekend_source()),
            clock_at(SATURDAY_8AM - 600),
            FixedOffset::east_opt(0).unwrap(),
        );
        let mut updates = screen.state().subscribe();
        screen.refresh();
        updates.wait_for(|s| s.data.is_some()).await.unwrap();
        assert_eq!(screen.state().snapshot().phase(), Phase::Loaded);
    }

    #[test]
    fn derivation_is_repeatable() {
        let source = weekend_source();
        let clock = FixedClock(DateTime::<Utc>::from_timestamp(SATURDAY_8AM - 600, 0).unwrap());
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let schedule = source.schedule();
        let first = derive_home(None, &schedule, &clock, &zone);
        let second = derive_home(None, &schedule, &clock, &zone);
        assert_eq!(first, second);
    }
}

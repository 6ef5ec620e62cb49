use async_trait::async_trait;
use std::{
    io,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use crate::{
    models::{
        driver::{Driver, DriverResponse},
        error::FetchError,
        race::{Race, ScheduleResponse, Session},
    },
    utils::api_client::RaceDataSource,
};

pub fn driver(id: &str, position: Option<u32>) -> Driver {
    Driver {
        driver_id: id.into(),
        permanent_number: None,
        code: None,
        url: None,
        given_name: id.to_uppercase(),
        family_name: "Driver".into(),
        date_of_birth: None,
        nationality: None,
        position,
        points: 0.0,
        wins: 0,
        podiums: 0,
        poles: 0,
        team_id: "team".into(),
        team_name: "Team".into(),
        team_color: None,
        profile_picture: None,
    }
}

pub fn race(id: &str, start: Option<i64>, state: &str) -> Race {
    Race {
        race_id: id.into(),
        round: 1,
        race_name: format!("{id} Grand Prix"),
        circuit_id: format!("{id}_circuit"),
        circuit_name: None,
        locality: None,
        country: None,
        race_start_time: start,
        race_end_time: start.map(|s| s + 2 * 86_400),
        race_state: state.into(),
        is_sprint: false,
        sessions: vec![],
        podium: None,
    }
}

pub fn session(id: &str, start: Option<i64>, end: Option<i64>) -> Session {
    Session {
        session_id: id.into(),
        session_type: id.into(),
        session_name: id.to_uppercase(),
        start_time: start,
        end_time: end,
        session_state: String::new(),
    }
}

/// In-memory data source whose failures can be switched on per endpoint.
pub struct FakeSource {
    drivers: Vec<Driver>,
    schedule: Vec<Race>,
    drivers_fail: AtomicBool,
    schedule_fail: AtomicBool,
    pub schedule_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(drivers: Vec<Driver>, schedule: Vec<Race>) -> Self {
        Self {
            drivers,
            schedule,
            drivers_fail: AtomicBool::new(false),
            schedule_fail: AtomicBool::new(false),
            schedule_calls: AtomicUsize::new(0),
        }
    }

    pub fn schedule(&self) -> Vec<Race> {
        self.schedule.clone()
    }

    pub fn fail_drivers_with_timeout(&self) {
        self.drivers_fail.store(true, Ordering::SeqCst);
    }

    pub fn fail_schedule_with_timeout(&self) {
        self.schedule_fail.store(true, Ordering::SeqCst);
    }
}

fn timeout(url: &str) -> FetchError {
    FetchError::Timeout {
        url: url.into(),
        source: Box::new(io::Error::new(io::ErrorKind::TimedOut, "timed out")),
    }
}

#[async_trait]
impl RaceDataSource for FakeSource {
    async fn fetch_drivers(&self) -> Result<DriverResponse, FetchError> {
        if self.drivers_fail.load(Ordering::SeqCst) {
            return Err(timeout("fake://drivers"));
        }
        Ok(DriverResponse {
            drivers: self.drivers.clone(),
        })
    }

    async fn fetch_schedule(&self) -> Result<ScheduleResponse, FetchError> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        if self.schedule_fail.load(Ordering::SeqCst) {
            return Err(timeout("fake://schedule"));
        }
        Ok(ScheduleResponse {
            schedule: self.schedule(),
        })
    }
}

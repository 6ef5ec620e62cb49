use chrono::{DateTime, Utc};

use crate::{
    models::race::{Race, Session},
    utils::time_utils::safe_instant,
};

pub const FIRST_PRACTICE: &str = "FP1";

/// Earliest race that is either flagged `upcoming` or starts after `now`.
/// Races without a usable start time never qualify.
pub fn select_upcoming_race(races: &[Race], now: DateTime<Utc>) -> Option<&Race> {
    races
        .iter()
        .filter_map(|race| safe_instant(race.race_start_time).map(|start| (race, start)))
        .filter(|(race, start)| race.is_upcoming() || *start > now)
        .min_by_key(|(_, start)| *start)
        .map(|(race, _)| race)
}

/// Earliest-starting session whose end is still ahead of `now`. Ties keep
/// the first session in storage order.
pub fn select_next_session(sessions: &[Session], now: DateTime<Utc>) -> Option<&Session> {
    sessions
        .iter()
        .filter_map(|session| {
            let start = safe_instant(session.start_time)?;
            let end = safe_instant(session.end_time)?;
            (end > now).then_some((session, start))
        })
        .min_by_key(|(_, start)| *start)
        .map(|(session, _)| session)
}

pub fn find_first_practice(race: &Race) -> Option<&Session> {
    race.sessions
        .iter()
        .find(|session| session.session_name == FIRST_PRACTICE)
}

/// `"red_bull_ring"` becomes `"Red Bull Ring"`.
pub fn format_circuit_id(circuit_id: &str) -> String {
    circuit_id
        .split('_')
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

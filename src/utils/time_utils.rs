use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

use crate::models::{race::Session, view_state::Countdown};

/// Source of "now", injected so that derivations can be replayed.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The one place epoch seconds become an instant. Missing or out-of-range
/// values resolve to `None`.
pub fn safe_instant(epoch_secs: Option<i64>) -> Option<DateTime<Utc>> {
    epoch_secs.and_then(|secs| DateTime::from_timestamp(secs, 0))
}

fn format_in_zone<Tz>(epoch_secs: Option<i64>, zone: &Tz, pattern: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    safe_instant(epoch_secs).map(|instant| instant.with_timezone(zone).format(pattern).to_string())
}

/// `"04 Friday"`: zero-padded day of month and full weekday name.
pub fn format_session_date_label<Tz>(session: &Session, zone: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_in_zone(session.start_time, zone, "%d %A")
}

/// `"8.00"`: 12-hour clock without hour padding.
pub fn format_session_time_label<Tz>(session: &Session, zone: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_in_zone(session.start_time, zone, "%-I.%M")
}

pub fn format_session_am_pm_label<Tz>(session: &Session, zone: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_in_zone(session.start_time, zone, "%p")
}

/// `"04 - 06 May"`, the month taken from the start instant.
pub fn format_date_range<Tz>(start: Option<i64>, end: Option<i64>, zone: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let start = safe_instant(start)?.with_timezone(zone);
    let end = safe_instant(end)?.with_timezone(zone);
    Some(format!(
        "{} - {} {}",
        start.format("%d"),
        end.format("%d"),
        start.format("%B")
    ))
}

pub fn compute_countdown(target: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    if target <= now {
        return Countdown::default();
    }
    let remaining = target - now;
    let days = remaining.num_days();
    let hours = (remaining - chrono::Duration::days(days)).num_hours();
    let minutes =
        (remaining - chrono::Duration::days(days) - chrono::Duration::hours(hours)).num_minutes();
    Countdown {
        days,
        hours,
        minutes,
    }
}

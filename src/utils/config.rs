use chrono::{FixedOffset, Local, Offset};
use std::{str::FromStr, time::Duration};

use crate::models::error::ConfigError;

pub const DEFAULT_DRIVERS_PATH: &str = "e8616da8-220c-4aab-a670-ab2d43224ecb";
pub const DEFAULT_SCHEDULE_PATH: &str = "9086a3f1-f02b-4d24-8dd3-b63582f45e67";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub drivers_path: String,
    pub schedule_path: String,
    pub http_timeout: Duration,
    pub display_offset: FixedOffset,
    pub countdown_tick: Duration,
    pub bind_addr: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: "http://127.0.0.1:8080/".to_string(),
            drivers_path: DEFAULT_DRIVERS_PATH.to_string(),
            schedule_path: DEFAULT_SCHEDULE_PATH.to_string(),
            http_timeout: Duration::from_secs(15),
            display_offset: Local::now().offset().fix(),
            countdown_tick: Duration::from_secs(60),
            bind_addr: "127.0.0.1:3000".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn init() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let offset_minutes: Option<i32> = parse_var(&lookup, "F1_DISPLAY_UTC_OFFSET_MINUTES")?;
        let display_offset = match offset_minutes {
            Some(minutes) => FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
                ConfigError::InvalidValue {
                    key: "F1_DISPLAY_UTC_OFFSET_MINUTES",
                    value: minutes.to_string(),
                    reason: "offset must be within +/- 24h".to_string(),
                }
            })?,
            None => defaults.display_offset,
        };

        Ok(Config {
            api_base_url: lookup("F1_API_BASE_URL").unwrap_or(defaults.api_base_url),
            drivers_path: lookup("F1_DRIVERS_PATH").unwrap_or(defaults.drivers_path),
            schedule_path: lookup("F1_SCHEDULE_PATH").unwrap_or(defaults.schedule_path),
            http_timeout: parse_secs(&lookup, "F1_HTTP_TIMEOUT_SECS")?
                .unwrap_or(defaults.http_timeout),
            display_offset,
            countdown_tick: parse_secs(&lookup, "F1_COUNTDOWN_TICK_SECS")?
                .unwrap_or(defaults.countdown_tick),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            log_level: lookup("LOG_LEVEL")
                .unwrap_or(defaults.log_level)
                .to_lowercase(),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

fn parse_secs<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: Option<u64> = parse_var(lookup, key)?;
    match secs {
        Some(0) => Err(ConfigError::InvalidValue {
            key,
            value: "0".to_string(),
            reason: "must be at least one second".to_string(),
        }),
        other => Ok(other.map(Duration::from_secs)),
    }
}

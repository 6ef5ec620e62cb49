use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::{
    io,
    sync::{PoisonError, RwLock},
};
use tracing::{debug, info, warn};

use crate::{
    models::{driver::DriverResponse, error::FetchError, race::ScheduleResponse},
    utils::config::Config,
};

/// Where drivers and the race schedule come from.
#[async_trait]
pub trait RaceDataSource: Send + Sync {
    async fn fetch_drivers(&self) -> Result<DriverResponse, FetchError>;
    async fn fetch_schedule(&self) -> Result<ScheduleResponse, FetchError>;

    /// Releases the underlying transport. Fetches made afterwards fail.
    fn close(&self) {}
}

/// HTTP client for the two JSON endpoints. One instance per application
/// session; the connection pool is released when it is closed or dropped.
pub struct ApiClient {
    client: RwLock<Option<Client>>,
    drivers_url: String,
    schedule_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let timeout = config.http_timeout;
        let client = ClientBuilder::new()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::from_reqwest(&config.api_base_url, e))?;

        let base_url = config.api_base_url.trim_end_matches('/');
        let drivers_url = format!("{base_url}/{}", config.drivers_path.trim_start_matches('/'));
        let schedule_url = format!(
            "{base_url}/{}",
            config.schedule_path.trim_start_matches('/')
        );
        info!(%drivers_url, %schedule_url, ?timeout, "API client created");

        Ok(Self {
            client: RwLock::new(Some(client)),
            drivers_url,
            schedule_url,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn client(&self, url: &str) -> Result<Client, FetchError> {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| FetchError::Transport {
                url: url.to_string(),
                source: Box::new(io::Error::new(
                    io::ErrorKind::NotConnected,
                    "API client is closed",
                )),
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "GET");
        let response = self
            .client(url)?
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "unexpected status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(url, "malformed body: {e}");
            FetchError::Decode {
                url: url.to_string(),
                source: Box::new(e),
            }
        })
    }
}

#[async_trait]
impl RaceDataSource for ApiClient {
    async fn fetch_drivers(&self) -> Result<DriverResponse, FetchError> {
        let drivers: DriverResponse = self.get_json(&self.drivers_url).await?;
        debug!(count = drivers.drivers.len(), "drivers fetched");
        Ok(drivers)
    }

    async fn fetch_schedule(&self) -> Result<ScheduleResponse, FetchError> {
        let schedule: ScheduleResponse = self.get_json(&self.schedule_url).await?;
        debug!(count = schedule.schedule.len(), "schedule fetched");
        Ok(schedule)
    }

    fn close(&self) {
        let client = self
            .client
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if client.is_some() {
            info!("Closing API client");
        }
    }
}

impl Drop for ApiClient {
    fn drop(&mut self) {
        tracing::trace!("API client released");
    }
}

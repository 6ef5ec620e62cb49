use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

use crate::{
    models::error::FetchError,
    screens::{countdown::CountdownTicker, DetailsScreen, HomeScreen},
    utils::{
        api_client::{ApiClient, RaceDataSource},
        config::Config,
        time_utils::{Clock, SystemClock},
    },
};

pub struct AppState {
    pub config: Config,
    pub source: Arc<dyn RaceDataSource>,
    pub clock: Arc<dyn Clock>,
    pub home: HomeScreen,
    pub details: DetailsScreen,
    countdown: Mutex<Option<CountdownTicker>>,
}

impl AppState {
    pub fn init(config: Config) -> Result<Self, FetchError> {
        let client = ApiClient::new(&config)?;
        Ok(Self::with_source(config, Arc::new(client), Arc::new(SystemClock)))
    }

    pub fn with_source(
        config: Config,
        source: Arc<dyn RaceDataSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let zone = config.display_offset;
        Self {
            home: HomeScreen::new(Arc::clone(&source), Arc::clone(&clock), zone),
            details: DetailsScreen::new(Arc::clone(&source), Arc::clone(&clock), zone),
            config,
            source,
            clock,
            countdown: Mutex::new(None),
        }
    }

    /// Kicks off the first refresh of both screens and the countdown tick.
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        self.home.refresh();
        self.details.refresh();
        let ticker = self.details.start_countdown(self.config.countdown_tick);
        *self
            .countdown
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(ticker);
        info!("screens started");
    }

    /// Cancels in-flight refreshes, stops the countdown and releases the
    /// HTTP transport.
    pub fn shutdown(&self) {
        self.home.teardown();
        self.details.teardown();
        self.countdown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.source.close();
        info!("screens torn down");
    }
}

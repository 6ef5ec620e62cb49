pub mod api_client;
pub mod config;
pub mod driver_utils;
pub mod race_utils;
pub mod state;
pub mod time_utils;

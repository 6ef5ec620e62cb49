use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    handlers::race::{get_races, upcoming_race},
    utils::state::AppState,
};

pub fn race_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_races))
        .route("/upcoming", get(upcoming_race))
}

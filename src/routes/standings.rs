use crate::{
    handlers::standings::{
        driver_by_position, drivers_by_team, get_drivers, leading_driver, top_drivers,
    },
    utils::state::AppState,
};
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn standings_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_drivers))
        .route("/top", get(top_drivers))
        .route("/leader", get(leading_driver))
        .route("/team/{team_id}", get(drivers_by_team))
        .route("/position/{position}", get(driver_by_position))
}

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::screens::{get_details, get_home, refresh_details, refresh_home},
    utils::state::AppState,
};

pub fn screen_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/home", get(get_home))
        .route("/home/refresh", post(refresh_home))
        .route("/details", get(get_details))
        .route("/details/refresh", post(refresh_details))
}

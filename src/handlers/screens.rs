use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use http::StatusCode;

use crate::utils::state::AppState;

pub async fn get_home(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.home.state().snapshot())).into_response()
}

pub async fn refresh_home(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.home.refresh();
    (StatusCode::ACCEPTED, Json(state.home.state().snapshot())).into_response()
}

pub async fn get_details(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.details.state().snapshot())).into_response()
}

pub async fn refresh_details(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.details.refresh();
    (StatusCode::ACCEPTED, Json(state.details.state().snapshot())).into_response()
}

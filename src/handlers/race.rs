use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use http::StatusCode;

use crate::{
    models::error::Error,
    utils::{race_utils::select_upcoming_race, state::AppState},
};

pub async fn get_races(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, Error> {
    let races = state.source.fetch_schedule().await?.schedule;
    Ok((StatusCode::OK, Json(races)))
}

pub async fn upcoming_race(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, Error> {
    let races = state.source.fetch_schedule().await?.schedule;
    let upcoming = select_upcoming_race(&races, state.clock.now()).cloned();
    Ok((StatusCode::OK, Json(upcoming)))
}

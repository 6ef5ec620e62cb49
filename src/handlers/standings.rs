use std::sync::Arc;

use crate::{
    models::error::Error,
    utils::{
        driver_utils::{
            select_driver_by_position, select_drivers_by_team, select_leading_driver,
            select_top_drivers, DEFAULT_TOP_DRIVERS,
        },
        state::AppState,
    },
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use http::StatusCode;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct TopDriversQuery {
    limit: Option<usize>,
}

pub async fn get_drivers(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, Error> {
    let drivers = state.source.fetch_drivers().await?.drivers;
    Ok((StatusCode::OK, Json(drivers)))
}

pub async fn top_drivers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopDriversQuery>,
) -> Result<impl IntoResponse, Error> {
    let limit = params.limit.unwrap_or(DEFAULT_TOP_DRIVERS);
    let drivers = state.source.fetch_drivers().await?.drivers;
    let top: Vec<_> = select_top_drivers(&drivers, limit)
        .into_iter()
        .cloned()
        .collect();
    Ok((StatusCode::OK, Json(top)))
}

pub async fn leading_driver(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, Error> {
    let drivers = state.source.fetch_drivers().await?.drivers;
    Ok((StatusCode::OK, Json(select_leading_driver(&drivers).cloned())))
}

pub async fn drivers_by_team(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let drivers = state.source.fetch_drivers().await?.drivers;
    let team: Vec<_> = select_drivers_by_team(&drivers, &team_id)
        .into_iter()
        .cloned()
        .collect();
    Ok((StatusCode::OK, Json(team)))
}

pub async fn driver_by_position(
    State(state): State<Arc<AppState>>,
    Path(position): Path<u32>,
) -> Result<impl IntoResponse, Error> {
    let drivers = state.source.fetch_drivers().await?.drivers;
    Ok((
        StatusCode::OK,
        Json(select_driver_by_position(&drivers, position).cloned()),
    ))
}

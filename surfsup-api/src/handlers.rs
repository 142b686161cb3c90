//! Route handlers. Each one issues a single DAL query and shapes the
//! result as JSON.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use std::collections::BTreeMap;
use surfsup_db::models::TemperatureStats;

const INDEX_HTML: &str = "Welcome to Climate App!<br/><br/>\
Available Routes:<br/>\
<a href='/api/v1.0/precipitation'>/api/v1.0/precipitation</a><br/>\
<a href='/api/v1.0/stations'>/api/v1.0/stations</a><br/>\
<a href='/api/v1.0/tobs'>/api/v1.0/tobs</a><br/>\
<a href='/api/v1.0/start_date'>/api/v1.0/start_date</a><br/>\
<a href='/api/v1.0/start_date/end_date'>/api/v1.0/start_date/end_date</a>";

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Precipitation for the trailing year, keyed by date.
///
/// Several stations report on the same day; the map keeps the last row
/// read for each date.
pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, ApiError> {
    let since = state.window_start()?;
    let rows = state
        .query(move |db| db.precipitation_since(&since))
        .await?;
    Ok(Json(rows.into_iter().map(|r| (r.date, r.prcp)).collect()))
}

pub async fn stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.query(|db| db.all_stations()).await?))
}

/// Trailing-year temperature observations of the most active station as
/// `[date, tobs]` pairs. Duplicate dates are kept.
pub async fn tobs(State(state): State<AppState>) -> Result<Json<Vec<(String, f64)>>, ApiError> {
    let since = state.window_start()?;
    let station = state.most_active_station().to_string();
    let rows = state
        .query(move |db| db.temperature_observations(&station, &since))
        .await?;
    Ok(Json(rows.into_iter().map(|r| (r.date, r.tobs)).collect()))
}

pub async fn temperature_stats_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let stats = state
        .query(move |db| db.temperature_stats_in_range(&start, None))
        .await?;
    Ok(Json(stats))
}

pub async fn temperature_stats_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let stats = state
        .query(move |db| db.temperature_stats_in_range(&start, Some(&end)))
        .await?;
    Ok(Json(stats))
}

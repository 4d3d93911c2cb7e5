use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::{error, warn};
use serde_json::{json, Value};
use std::{collections::BTreeMap, sync::Arc};

use crate::{dates, AppState, PrecipitationRecord, TemperatureRecord};

fn internal_error<E: std::fmt::Display>(err: E) -> (StatusCode, Json<Value>) {
    error!("error querying climate dataset: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("Failed to query climate data: {}", err) })),
    )
}

fn invalid_date(err: dates::Error) -> (StatusCode, Json<Value>) {
    warn!("rejected request: {}", err);
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": err.to_string() })),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Every (date, precipitation) measurement in table order", body = Vec<PrecipitationRecord>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationRecord>>, (StatusCode, Json<Value>)> {
    let records = state
        .climate_db
        .precipitation()
        .await
        .map_err(internal_error)?;

    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Object mapping station name to station code"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, String>>, (StatusCode, Json<Value>)> {
    let rows = state.climate_db.stations().await.map_err(internal_error)?;

    // The object is keyed by name, so duplicate names conflate last-write-wins
    let by_name = rows
        .into_iter()
        .map(|row| (row.name, row.station))
        .collect();

    Ok(Json(by_name))
}

/// Temperature observations over the 12 calendar months preceding the most
/// recent measurement date. No station filter is applied; observations from
/// every station are returned, which existing consumers rely on.
#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "(date, temperature) measurements from the last 12 months", body = Vec<TemperatureRecord>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset, or the stored maximum date is not a valid calendar date")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureRecord>>, (StatusCode, Json<Value>)> {
    let Some(latest) = state
        .climate_db
        .latest_date()
        .await
        .map_err(internal_error)?
    else {
        return Ok(Json(vec![]));
    };

    // The maximum date comes from the dataset itself; failing to parse it
    // means the store is corrupt, which is fatal for this request
    let latest = dates::parse_date(&latest).map_err(internal_error)?;
    let lower_bound =
        dates::format_date(dates::months_back(latest, 12)).map_err(internal_error)?;

    let records = state
        .climate_db
        .temperatures_since(&lower_bound)
        .await
        .map_err(internal_error)?;

    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "Inclusive lower bound, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Single-element array wrapping [Start Date, Minimum Temperature, Maximum Temperature, Average Temperature] as single-key objects"),
        (status = BAD_REQUEST, description = "Start date is not a valid YYYY-MM-DD date"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn stats_from_start(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<Vec<Value>>>, (StatusCode, Json<Value>)> {
    dates::parse_date(&start).map_err(invalid_date)?;

    let stats = state
        .climate_db
        .temperature_stats_from(&start)
        .await
        .map_err(internal_error)?;

    // Historical response shape: one array of single-key objects in fixed
    // order, wrapped in an outer single-element array
    Ok(Json(vec![vec![
        json!({ "Start Date": start }),
        json!({ "Minimum Temperature": stats.min }),
        json!({ "Maximum Temperature": stats.max }),
        json!({ "Average Temperature": stats.avg }),
    ]]))
}

/// Aggregates over `start <= date <= end`. The range is not validated;
/// an inverted range matches no rows and yields null aggregates.
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "Inclusive lower bound, YYYY-MM-DD"),
        ("end" = String, Path, description = "Inclusive upper bound, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Single-element array wrapping [Start Date, End Date, Minimum Temperature, Maximum Temperature, Average Temperature] as single-key objects"),
        (status = BAD_REQUEST, description = "Either date is not a valid YYYY-MM-DD date"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset")
    ))]
pub async fn stats_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<Vec<Value>>>, (StatusCode, Json<Value>)> {
    dates::parse_date(&start).map_err(invalid_date)?;
    dates::parse_date(&end).map_err(invalid_date)?;

    let stats = state
        .climate_db
        .temperature_stats_between(&start, &end)
        .await
        .map_err(internal_error)?;

    Ok(Json(vec![vec![
        json!({ "Start Date": start }),
        json!({ "End Date": end }),
        json!({ "Minimum Temperature": stats.min }),
        json!({ "Maximum Temperature": stats.max }),
        json!({ "Average Temperature": stats.avg }),
    ]]))
}

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to query climate dataset: {0}")]
    Query(#[from] sqlx::Error),
}

/// One `(date, prcp)` measurement row. Field names match the public
/// response contract, so existing consumers keep working.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PrecipitationRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Precipitation")]
    pub precipitation: Option<f64>,
}

/// One `(date, tobs)` measurement row.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TemperatureRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

/// One `(name, station)` pair from the station table.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRow {
    pub name: String,
    pub station: String,
}

/// Aggregates over a filtered measurement set. All three are `None` when
/// the filter matches no rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Every `(date, prcp)` pair, in table order.
    async fn precipitation(&self) -> Result<Vec<PrecipitationRecord>, Error>;
    /// Every `(name, station)` pair, in table order.
    async fn stations(&self) -> Result<Vec<StationRow>, Error>;
    /// The maximum `date` across all measurements, `None` on an empty table.
    async fn latest_date(&self) -> Result<Option<String>, Error>;
    /// `(date, tobs)` pairs with `date >= lower_bound` (string comparison),
    /// in table order.
    async fn temperatures_since(&self, lower_bound: &str)
        -> Result<Vec<TemperatureRecord>, Error>;
    /// min/max/avg of `tobs` over rows with `date >= start`.
    async fn temperature_stats_from(&self, start: &str) -> Result<TemperatureStats, Error>;
    /// min/max/avg of `tobs` over rows with `date >= start AND date <= end`.
    async fn temperature_stats_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureStats, Error>;
}

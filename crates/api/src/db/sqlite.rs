use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{str::FromStr, time::Duration};

use super::{
    ClimateData, Error, PrecipitationRecord, StationRow, TemperatureRecord, TemperatureStats,
};

/// Read-only pool over the pre-populated dataset file. One pool is owned by
/// the process; each request acquires a connection and releases it on every
/// exit path when the sqlx executor drops it.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(db_path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path))?
            .create_if_missing(false)
            .read_only(true)
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "MEMORY");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open climate dataset at {}", db_path))?;

        let db = Self { pool };
        db.health_check().await?;
        info!("climate dataset opened read-only: {}", db_path);

        Ok(db)
    }

    /// Wrap an existing pool. Used by tests that seed an in-memory dataset.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check database connectivity and integrity.
    pub async fn health_check(&self) -> Result<()> {
        // Basic connectivity
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Database connectivity check failed")?;

        // Page structure integrity
        let result: String = sqlx::query_scalar("PRAGMA quick_check;")
            .fetch_one(&self.pool)
            .await
            .context("Database integrity check failed")?;
        if result != "ok" {
            return Err(anyhow::anyhow!(
                "Database integrity check failed: {}",
                result
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl ClimateData for Database {
    async fn precipitation(&self) -> Result<Vec<PrecipitationRecord>, Error> {
        let rows: Vec<(String, Option<f64>)> = sqlx::query_as("SELECT date, prcp FROM measurement")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(date, precipitation)| PrecipitationRecord {
                date,
                precipitation,
            })
            .collect())
    }

    async fn stations(&self) -> Result<Vec<StationRow>, Error> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT name, station FROM station")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(name, station)| StationRow { name, station })
            .collect())
    }

    async fn latest_date(&self) -> Result<Option<String>, Error> {
        let row: (Option<String>,) = sqlx::query_as("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }

    async fn temperatures_since(
        &self,
        lower_bound: &str,
    ) -> Result<Vec<TemperatureRecord>, Error> {
        let rows: Vec<(String, f64)> =
            sqlx::query_as("SELECT date, tobs FROM measurement WHERE date >= ?")
                .bind(lower_bound)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(date, temperature)| TemperatureRecord { date, temperature })
            .collect())
    }

    async fn temperature_stats_from(&self, start: &str) -> Result<TemperatureStats, Error> {
        let (min, max, avg): (Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
            "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement WHERE date >= ?",
        )
        .bind(start)
        .fetch_one(&self.pool)
        .await?;

        Ok(TemperatureStats { min, max, avg })
    }

    async fn temperature_stats_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureStats, Error> {
        let (min, max, avg): (Option<f64>, Option<f64>, Option<f64>) = sqlx::query_as(
            "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement WHERE date >= ? AND date <= ?",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(TemperatureStats { min, max, avg })
    }
}

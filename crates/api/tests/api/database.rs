use climate_api::{ClimateData, Database};
use sqlx::sqlite::SqlitePoolOptions;

/// Build an in-memory dataset with the measurement/station schema and seed it.
/// A single connection keeps the memory database alive for the whole test.
async fn seeded_database(
    measurements: &[(&str, &str, Option<f64>, f64)],
    stations: &[(&str, &str)],
) -> Database {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite");

    sqlx::query(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp REAL,
            tobs REAL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude REAL,
            longitude REAL,
            elevation REAL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    for (station, date, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(station)
            .bind(date)
            .bind(prcp)
            .bind(tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    for (station, name) in stations {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation)
             VALUES (?, ?, 21.27, -157.81, 3.0)",
        )
        .bind(station)
        .bind(name)
        .execute(&pool)
        .await
        .unwrap();
    }

    Database::from_pool(pool)
}

#[tokio::test]
async fn start_stats_match_directly_computed_aggregates() {
    let db = seeded_database(
        &[
            ("USC00519397", "2017-01-01", Some(0.1), 0.5),
            ("USC00519397", "2017-06-01", Some(0.2), 1.2),
            ("USC00519397", "2017-12-01", None, 0.0),
        ],
        &[],
    )
    .await;

    let stats = db.temperature_stats_from("2017-06-01").await.unwrap();

    assert_eq!(stats.min, Some(0.0));
    assert_eq!(stats.max, Some(1.2));
    assert!((stats.avg.unwrap() - 0.6).abs() < 1e-9);
}

#[tokio::test]
async fn range_stats_respect_both_bounds() {
    let db = seeded_database(
        &[
            ("USC00519397", "2017-01-01", None, 60.0),
            ("USC00519397", "2017-06-01", None, 75.0),
            ("USC00519397", "2017-12-01", None, 65.0),
        ],
        &[],
    )
    .await;

    let stats = db
        .temperature_stats_between("2017-01-01", "2017-06-01")
        .await
        .unwrap();

    assert_eq!(stats.min, Some(60.0));
    assert_eq!(stats.max, Some(75.0));
    assert!((stats.avg.unwrap() - 67.5).abs() < 1e-9);
}

#[tokio::test]
async fn inverted_range_yields_null_aggregates() {
    let db = seeded_database(&[("USC00519397", "2017-06-01", None, 75.0)], &[]).await;

    let stats = db
        .temperature_stats_between("2017-12-01", "2017-01-01")
        .await
        .unwrap();

    assert_eq!(stats.min, None);
    assert_eq!(stats.max, None);
    assert_eq!(stats.avg, None);
}

#[tokio::test]
async fn precipitation_rows_correspond_to_measurement_rows() {
    let db = seeded_database(
        &[
            ("USC00519397", "2017-01-01", Some(0.08), 65.0),
            ("USC00513117", "2017-01-02", None, 63.0),
        ],
        &[],
    )
    .await;

    let records = db.precipitation().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, "2017-01-01");
    assert_eq!(records[0].precipitation, Some(0.08));
    assert_eq!(records[1].date, "2017-01-02");
    assert_eq!(records[1].precipitation, None);
}

#[tokio::test]
async fn stations_returns_one_row_per_station_row() {
    let db = seeded_database(
        &[],
        &[
            ("USC00519397", "WAIKIKI 717.2, HI US"),
            ("USC00513117", "KANEOHE 838.1, HI US"),
            ("USC00514830", "KUALOA RANCH HEADQUARTERS 886.9, HI US"),
        ],
    )
    .await;

    let rows = db.stations().await.unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].station, "USC00519397");
    assert_eq!(rows[0].name, "WAIKIKI 717.2, HI US");
}

#[tokio::test]
async fn latest_date_is_the_lexicographic_maximum() {
    let db = seeded_database(
        &[
            ("USC00519397", "2016-12-31", None, 70.0),
            ("USC00519397", "2017-08-23", None, 76.0),
            ("USC00519397", "2017-02-14", None, 68.0),
        ],
        &[],
    )
    .await;

    assert_eq!(db.latest_date().await.unwrap().as_deref(), Some("2017-08-23"));
}

#[tokio::test]
async fn latest_date_on_an_empty_table_is_none() {
    let db = seeded_database(&[], &[]).await;

    assert_eq!(db.latest_date().await.unwrap(), None);
}

#[tokio::test]
async fn temperatures_since_filters_by_string_comparison() {
    let db = seeded_database(
        &[
            ("USC00519397", "2016-08-22", None, 70.0),
            ("USC00519397", "2016-08-23", None, 71.0),
            ("USC00513117", "2017-08-23", None, 76.0),
        ],
        &[],
    )
    .await;

    let records = db.temperatures_since("2016-08-23").await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, "2016-08-23");
    assert_eq!(records[0].temperature, 71.0);
    assert_eq!(records[1].date, "2017-08-23");
}

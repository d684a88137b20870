use crate::helpers::{day, seeded_store, spawn_app, MeasurementRow};
use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use climate_api::{
    db::schema::TABLES, ClimateAccess, ClimateData, ClimateQueries, DateWindow, QueryError,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const MEASUREMENTS: &[MeasurementRow] = &[
    ("USC00519397", "2010-01-01", Some(0.08), Some(65.0)),
    ("USC00519397", "2010-01-02", Some(0.0), Some(63.0)),
    ("USC00519397", "2016-08-23", Some(0.0), Some(81.0)),
    ("USC00519397", "2017-08-23", Some(0.0), Some(81.0)),
    ("USC00519281", "2010-01-01", Some(0.15), Some(70.0)),
    ("USC00519281", "2016-08-22", None, Some(76.0)),
    ("USC00519281", "2016-08-23", Some(1.79), Some(77.0)),
    ("USC00519281", "2017-08-18", Some(0.06), Some(79.0)),
    ("USC00519281", "2017-08-22", Some(0.0), None),
    ("USC00519281", "2017-08-23", Some(0.45), Some(76.0)),
];

#[tokio::test]
async fn latest_date_and_membership() {
    let store = seeded_store(MEASUREMENTS).await;

    assert_eq!(
        store.latest_observation_date().await.unwrap(),
        Some(day("08232017"))
    );
    assert_eq!(
        store.earliest_observation_date().await.unwrap(),
        Some(day("01012010"))
    );
    assert!(store.has_observations_on(&day("01022010")).await.unwrap());
    // inside the dataset's span but never observed
    assert!(!store.has_observations_on(&day("06152012")).await.unwrap());
    assert!(!store.has_observations_on(&day("01012030")).await.unwrap());
}

#[tokio::test]
async fn empty_store_has_no_latest_date() {
    let store = seeded_store(&[]).await;

    assert_eq!(store.latest_observation_date().await.unwrap(), None);
    assert_eq!(store.earliest_observation_date().await.unwrap(), None);
    assert!(store.observation_counts().await.unwrap().is_empty());
}

#[tokio::test]
async fn counts_are_largest_first() {
    let store = seeded_store(MEASUREMENTS).await;

    let counts = store.observation_counts().await.unwrap();

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].station, "USC00519281");
    assert_eq!(counts[0].observations, 6);
    assert_eq!(counts[1].observations, 4);
}

#[tokio::test]
async fn precipitation_keeps_every_row_and_nulls() {
    let store = seeded_store(MEASUREMENTS).await;

    let rows = store.precipitation_since(&day("08232016")).await.unwrap();

    let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
    assert_eq!(
        dates,
        [
            "2016-08-23",
            "2017-08-23",
            "2016-08-23",
            "2017-08-18",
            "2017-08-22",
            "2017-08-23"
        ]
    );
}

#[tokio::test]
async fn temperatures_respect_window_and_skip_nulls() {
    let store = seeded_store(MEASUREMENTS).await;

    let open = store
        .temperatures_in(&DateWindow::open(day("08182017")))
        .await
        .unwrap();
    assert_eq!(open.len(), 3);
    assert!(open.iter().all(|r| r.value.is_some()));

    let bounded = store
        .temperatures_in(&DateWindow::bounded(day("01012010"), day("01022010")))
        .await
        .unwrap();
    assert_eq!(bounded.len(), 3);
    assert!(bounded.windows(2).all(|pair| pair[0].date <= pair[1].date));
}

#[tokio::test]
async fn stations_come_back_in_table_order() {
    let store = seeded_store(&[]).await;

    let stations = store.stations().await.unwrap();

    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].station, "USC00519397");
    assert_eq!(stations[1].elevation, Some(32.9));
}

#[tokio::test]
async fn null_station_fields_stay_null() {
    let store = ClimateAccess::in_memory().await.unwrap();
    sqlx::query(
        "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES ('S1', NULL, NULL, 1.0, 2.0)",
    )
    .execute(store.pool())
    .await
    .unwrap();

    let stations = store.stations().await.unwrap();

    assert_eq!(stations[0].name, None);
    assert_eq!(
        serde_json::to_value(&stations).unwrap(),
        json!([{
            "station": "S1",
            "name": null,
            "latitude": null,
            "longitude": 1.0,
            "elevation": 2.0
        }])
    );
}

#[tokio::test]
async fn declared_schema_verifies() {
    let store = seeded_store(&[]).await;
    store.verify_schema().await.unwrap();
    assert_eq!(TABLES.len(), 2);
}

#[tokio::test]
async fn schema_missing_a_column_is_rejected() {
    let store = ClimateAccess::in_memory().await.unwrap();
    sqlx::query("ALTER TABLE measurement DROP COLUMN tobs")
        .execute(store.pool())
        .await
        .unwrap();

    let err = store.verify_schema().await.unwrap_err();

    assert!(err.to_string().contains("tobs"));
}

#[tokio::test]
async fn missing_database_file_is_reported() {
    let result = ClimateAccess::connect("/nonexistent/hawaii.sqlite", 1).await;
    assert!(matches!(result, Err(climate_api::db::Error::NotFound(_))));
}

#[tokio::test]
async fn aggregates_over_sqlite() {
    let queries = ClimateQueries::new(Arc::new(seeded_store(MEASUREMENTS).await));

    let rows = queries
        .two_bound_aggregate("08222016", "08232016")
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, day("08222016"));
    assert_eq!((rows[0].min, rows[0].avg, rows[0].max), (76.0, 76.0, 76.0));
    assert_eq!((rows[1].min, rows[1].avg, rows[1].max), (77.0, 79.0, 81.0));
}

#[tokio::test]
async fn date_with_only_null_temperatures_is_dropped() {
    let queries = ClimateQueries::new(Arc::new(seeded_store(MEASUREMENTS).await));

    let rows = queries.single_bound_aggregate("08222017").await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, day("08232017"));
    assert_eq!((rows[0].min, rows[0].max), (76.0, 81.0));
}

#[tokio::test]
async fn inverted_range_over_sqlite_is_empty_range() {
    let queries = ClimateQueries::new(Arc::new(seeded_store(MEASUREMENTS).await));

    let err = queries
        .two_bound_aggregate("08232017", "01012010")
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::EmptyRange { .. }));
}

#[tokio::test]
async fn busiest_station_temps_end_to_end() {
    let test_app = spawn_app(Arc::new(seeded_store(MEASUREMENTS).await));

    let request = Request::builder()
        .uri("/api/v1.0/tobs")
        .body(Body::empty())
        .unwrap();
    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    // 2016-08-22 falls just before the 365-day window starting 2016-08-23
    assert_eq!(
        body,
        json!({"USC00519281": [
            {"2016-08-23": 77.0},
            {"2017-08-18": 79.0},
            {"2017-08-22": null},
            {"2017-08-23": 76.0}
        ]})
    );
}

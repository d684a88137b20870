use async_trait::async_trait;
use axum::Router;
use climate_api::{
    app, db, AppState, CanonicalDate, ClimateAccess, ClimateData, DailyReading, DateWindow,
    Station, StationCount,
};
use mockall::mock;
use std::{sync::Arc, time::Duration};

mock! {
    pub ClimateAccess {}
    #[async_trait]
    impl ClimateData for ClimateAccess {
        async fn latest_observation_date(&self) -> Result<Option<CanonicalDate>, db::Error>;
        async fn earliest_observation_date(&self) -> Result<Option<CanonicalDate>, db::Error>;
        async fn has_observations_on(&self, date: &CanonicalDate) -> Result<bool, db::Error>;
        async fn observation_counts(&self) -> Result<Vec<StationCount>, db::Error>;
        async fn precipitation_since(&self, start: &CanonicalDate) -> Result<Vec<DailyReading>, db::Error>;
        async fn station_temperatures_since(
            &self,
            station: &str,
            start: &CanonicalDate,
        ) -> Result<Vec<DailyReading>, db::Error>;
        async fn temperatures_in(&self, window: &DateWindow) -> Result<Vec<DailyReading>, db::Error>;
        async fn stations(&self) -> Result<Vec<Station>, db::Error>;
    }
}

pub struct TestApp {
    pub app: Router,
}

pub fn spawn_app(store: Arc<dyn ClimateData>) -> TestApp {
    spawn_app_with_timeout(store, Duration::from_secs(5))
}

pub fn spawn_app_with_timeout(store: Arc<dyn ClimateData>, request_timeout: Duration) -> TestApp {
    let state = AppState::new(String::from("http://127.0.0.1:5000"), request_timeout, store);
    TestApp { app: app(state) }
}

/// Store whose station lookup outlasts any short request timeout.
pub struct SlowStore;

#[async_trait]
impl ClimateData for SlowStore {
    async fn latest_observation_date(&self) -> Result<Option<CanonicalDate>, db::Error> {
        Ok(None)
    }
    async fn earliest_observation_date(&self) -> Result<Option<CanonicalDate>, db::Error> {
        Ok(None)
    }
    async fn has_observations_on(&self, _date: &CanonicalDate) -> Result<bool, db::Error> {
        Ok(false)
    }
    async fn observation_counts(&self) -> Result<Vec<StationCount>, db::Error> {
        Ok(vec![])
    }
    async fn precipitation_since(&self, _start: &CanonicalDate) -> Result<Vec<DailyReading>, db::Error> {
        Ok(vec![])
    }
    async fn station_temperatures_since(
        &self,
        _station: &str,
        _start: &CanonicalDate,
    ) -> Result<Vec<DailyReading>, db::Error> {
        Ok(vec![])
    }
    async fn temperatures_in(&self, _window: &DateWindow) -> Result<Vec<DailyReading>, db::Error> {
        Ok(vec![])
    }
    async fn stations(&self) -> Result<Vec<Station>, db::Error> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Ok(mock_stations())
    }
}

/// One `measurement` row: station, ISO date, prcp, tobs.
pub type MeasurementRow = (&'static str, &'static str, Option<f64>, Option<f64>);

/// In-memory store holding the given measurements and the two sample stations.
pub async fn seeded_store(measurements: &[MeasurementRow]) -> ClimateAccess {
    let store = ClimateAccess::in_memory()
        .await
        .expect("Failed to create in-memory store");

    for (station, date, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(store.pool())
            .await
            .expect("Failed to insert measurement");
    }

    for station in mock_stations() {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&station.station)
        .bind(station.name.clone())
        .bind(station.latitude)
        .bind(station.longitude)
        .bind(station.elevation)
        .execute(store.pool())
        .await
        .expect("Failed to insert station");
    }

    store
}

pub fn mock_stations() -> Vec<Station> {
    vec![
        Station {
            station: String::from("USC00519397"),
            name: Some(String::from("WAIKIKI 717.2, HI US")),
            latitude: Some(21.2716),
            longitude: Some(-157.8168),
            elevation: Some(3.0),
        },
        Station {
            station: String::from("USC00519281"),
            name: Some(String::from("WAIHEE 837.5, HI US")),
            latitude: Some(21.45167),
            longitude: Some(-157.84888999999998),
            elevation: Some(32.9),
        },
    ]
}

pub fn day(token: &str) -> CanonicalDate {
    climate_api::query::normalize(token).expect("valid test date")
}

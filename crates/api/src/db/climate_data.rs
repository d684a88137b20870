use async_trait::async_trait;
use climate_api_core::is_file;
use log::{debug, info};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use sqlx::{
    sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    QueryBuilder,
};
use std::time::Duration;
use utoipa::ToSchema;

use super::schema::{MEASUREMENT, STATION, TABLES};
use crate::query::{CanonicalDate, DateWindow};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("Stored date '{0}' is not in YYYY-MM-DD form")]
    CorruptDate(String),
    #[error("Table '{table}' is missing column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("Database file not found: {0}")]
    NotFound(String),
}

/// Read-only access to the observation and station tables.
///
/// Every call checks a connection out of the pool for the duration of the
/// call only; nothing is held between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Greatest observation date, `None` when there are no observations.
    async fn latest_observation_date(&self) -> Result<Option<CanonicalDate>, Error>;
    async fn earliest_observation_date(&self) -> Result<Option<CanonicalDate>, Error>;
    async fn has_observations_on(&self, date: &CanonicalDate) -> Result<bool, Error>;
    /// Observation rows per station, largest count first. Order among equal
    /// counts is whatever the store yields.
    async fn observation_counts(&self) -> Result<Vec<StationCount>, Error>;
    /// Raw `(date, prcp)` rows on or after `start`, in storage order.
    async fn precipitation_since(&self, start: &CanonicalDate) -> Result<Vec<DailyReading>, Error>;
    /// Raw `(date, tobs)` rows for one station on or after `start`, ascending by date.
    async fn station_temperatures_since(
        &self,
        station: &str,
        start: &CanonicalDate,
    ) -> Result<Vec<DailyReading>, Error>;
    /// Non-null `(date, tobs)` rows inside `window`, ascending by date.
    async fn temperatures_in(&self, window: &DateWindow) -> Result<Vec<DailyReading>, Error>;
    async fn stations(&self) -> Result<Vec<Station>, Error>;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema, sqlx::FromRow)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StationCount {
    pub station: String,
    pub observations: i64,
}

/// One observation value keyed by its date.
///
/// Serializes as a single-key map, `{"2017-08-23": 0.45}`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReading {
    pub date: CanonicalDate,
    pub value: Option<f64>,
}

impl Serialize for DailyReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.value)?;
        map.end()
    }
}

type ReadingRow = (String, Option<f64>);

fn decode_date(value: String) -> Result<CanonicalDate, Error> {
    CanonicalDate::from_iso(&value).map_err(|_| Error::CorruptDate(value))
}

fn decode_readings(rows: Vec<ReadingRow>) -> Result<Vec<DailyReading>, Error> {
    rows.into_iter()
        .map(|(date, value)| {
            Ok(DailyReading {
                date: decode_date(date)?,
                value,
            })
        })
        .collect()
}

pub struct ClimateAccess {
    pool: SqlitePool,
}

impl ClimateAccess {
    /// Open an existing database file read-only.
    pub async fn connect(path: &str, max_connections: u32) -> Result<Self, Error> {
        if !is_file(path) {
            return Err(Error::NotFound(path.to_owned()));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .pragma("busy_timeout", "5000");

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("SQLite database opened read-only at: {}", path);
        Ok(Self { pool })
    }

    /// Fresh in-memory store with the declared tables and no rows.
    ///
    /// Pinned to a single connection that never expires, since every SQLite
    /// in-memory connection is its own database.
    pub async fn in_memory() -> Result<Self, Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        for table in TABLES {
            sqlx::query(table.ddl).execute(&pool).await?;
        }

        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check connectivity and that every declared column is present.
    pub async fn verify_schema(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;

        for table in TABLES {
            let found: Vec<String> =
                sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
                    .bind(table.name)
                    .fetch_all(&self.pool)
                    .await?;
            debug!("table {} has columns {:?}", table.name, found);

            if let Some(column) = table
                .columns
                .iter()
                .copied()
                .find(|column| !found.iter().any(|name| name == column))
            {
                return Err(Error::MissingColumn {
                    table: table.name,
                    column,
                });
            }
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn latest_observation_date(&self) -> Result<Option<CanonicalDate>, Error> {
        let latest: Option<String> =
            sqlx::query_scalar(&format!("SELECT MAX(date) FROM {}", MEASUREMENT.name))
                .fetch_one(&self.pool)
                .await?;
        latest.map(decode_date).transpose()
    }

    async fn earliest_observation_date(&self) -> Result<Option<CanonicalDate>, Error> {
        let earliest: Option<String> =
            sqlx::query_scalar(&format!("SELECT MIN(date) FROM {}", MEASUREMENT.name))
                .fetch_one(&self.pool)
                .await?;
        earliest.map(decode_date).transpose()
    }

    async fn has_observations_on(&self, date: &CanonicalDate) -> Result<bool, Error> {
        let exists: i64 = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE date = ?)",
            MEASUREMENT.name
        ))
        .bind(date.to_string())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists != 0)
    }

    async fn observation_counts(&self) -> Result<Vec<StationCount>, Error> {
        let counts = sqlx::query_as::<_, StationCount>(&format!(
            "SELECT station, COUNT(*) AS observations
             FROM {}
             WHERE station IS NOT NULL
             GROUP BY station
             ORDER BY COUNT(*) DESC",
            MEASUREMENT.name
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }

    async fn precipitation_since(&self, start: &CanonicalDate) -> Result<Vec<DailyReading>, Error> {
        let rows: Vec<ReadingRow> = sqlx::query_as(&format!(
            "SELECT date, prcp FROM {} WHERE date >= ? ORDER BY id",
            MEASUREMENT.name
        ))
        .bind(start.to_string())
        .fetch_all(&self.pool)
        .await?;
        decode_readings(rows)
    }

    async fn station_temperatures_since(
        &self,
        station: &str,
        start: &CanonicalDate,
    ) -> Result<Vec<DailyReading>, Error> {
        let rows: Vec<ReadingRow> = sqlx::query_as(&format!(
            "SELECT date, tobs FROM {} WHERE station = ? AND date >= ? ORDER BY date, id",
            MEASUREMENT.name
        ))
        .bind(station)
        .bind(start.to_string())
        .fetch_all(&self.pool)
        .await?;
        decode_readings(rows)
    }

    async fn temperatures_in(&self, window: &DateWindow) -> Result<Vec<DailyReading>, Error> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT date, tobs FROM {} WHERE tobs IS NOT NULL AND date >= ",
            MEASUREMENT.name
        ));
        query.push_bind(window.start.to_string());
        if let Some(end) = window.end {
            query.push(" AND date <= ").push_bind(end.to_string());
        }
        query.push(" ORDER BY date");

        let rows: Vec<ReadingRow> = query.build_query_as().fetch_all(&self.pool).await?;
        decode_readings(rows)
    }

    async fn stations(&self) -> Result<Vec<Station>, Error> {
        let stations = sqlx::query_as::<_, Station>(&format!(
            "SELECT station, name, latitude, longitude, elevation FROM {} ORDER BY id",
            STATION.name
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(stations)
    }
}

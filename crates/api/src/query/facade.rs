use log::{debug, info};
use serde::Serialize;
use std::{fmt, sync::Arc};

use super::{
    busiest_station, dataset_span, most_recent_date, summarize, trailing_year, validate, AggregateRow,
    CanonicalDate, DateWindow,
};
use crate::db::{self, ClimateData, DailyReading, Station};

/// Which side of a date range a caller token was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Start => write!(f, "start"),
            Bound::End => write!(f, "end"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    /// Malformed token or a date with no observations; the two are not told apart.
    #[error("invalid {bound} date: {token}")]
    InvalidDate { bound: Bound, token: String },
    /// A validated range produced no rows, reported as start after end.
    #[error("no observations between {start} and {end}")]
    EmptyRange {
        start: CanonicalDate,
        end: CanonicalDate,
    },
    #[error("dataset contains no observations")]
    EmptyDataset,
    #[error(transparent)]
    Store(#[from] db::Error),
}

/// Temperature series of the station with the most observations.
#[derive(Debug, Clone, PartialEq)]
pub struct StationTemperatures {
    pub station: String,
    pub readings: Vec<DailyReading>,
}

impl Serialize for StationTemperatures {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.station, &self.readings)?;
        map.end()
    }
}

/// Answers the service's requests on top of an injected store.
///
/// Nothing is cached; the most recent date and busiest station are looked up
/// again on every call.
pub struct ClimateQueries {
    store: Arc<dyn ClimateData>,
}

impl ClimateQueries {
    pub fn new(store: Arc<dyn ClimateData>) -> Self {
        Self { store }
    }

    async fn trailing_window_start(&self) -> Result<CanonicalDate, QueryError> {
        let latest = most_recent_date(self.store.as_ref()).await?;
        let start = trailing_year(latest);
        debug!("trailing window {} to {}", start, latest);
        Ok(start)
    }

    /// Every observation's precipitation within the trailing year, unaggregated.
    pub async fn precipitation_series(&self) -> Result<Vec<DailyReading>, QueryError> {
        let start = self.trailing_window_start().await?;
        Ok(self.store.precipitation_since(&start).await?)
    }

    /// First and last observation dates, for display.
    pub async fn dataset_span(
        &self,
    ) -> Result<Option<(CanonicalDate, CanonicalDate)>, QueryError> {
        Ok(dataset_span(self.store.as_ref()).await?)
    }

    pub async fn station_list(&self) -> Result<Vec<Station>, QueryError> {
        Ok(self.store.stations().await?)
    }

    pub async fn busiest_station_temps(&self) -> Result<StationTemperatures, QueryError> {
        let station = busiest_station(self.store.as_ref()).await?;
        let start = self.trailing_window_start().await?;
        let readings = self
            .store
            .station_temperatures_since(&station, &start)
            .await?;
        Ok(StationTemperatures { station, readings })
    }

    pub async fn aggregate(&self, window: &DateWindow) -> Result<Vec<AggregateRow>, QueryError> {
        let readings = self.store.temperatures_in(window).await?;
        Ok(summarize(window, readings))
    }

    /// Daily temperature summary for every date on or after `start`.
    pub async fn single_bound_aggregate(
        &self,
        start: &str,
    ) -> Result<Vec<AggregateRow>, QueryError> {
        let start = self.validated(Bound::Start, start).await?;
        self.aggregate(&DateWindow::open(start)).await
    }

    /// Daily temperature summary for `start..=end`.
    ///
    /// An empty result is reported as [`QueryError::EmptyRange`] whether the
    /// bounds are inverted or the range simply holds no temperatures.
    pub async fn two_bound_aggregate(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<AggregateRow>, QueryError> {
        let start = self.validated(Bound::Start, start).await?;
        let end = self.validated(Bound::End, end).await?;

        let rows = self.aggregate(&DateWindow::bounded(start, end)).await?;
        if rows.is_empty() {
            info!("empty range {} to {}", start, end);
            return Err(QueryError::EmptyRange { start, end });
        }
        Ok(rows)
    }

    async fn validated(&self, bound: Bound, token: &str) -> Result<CanonicalDate, QueryError> {
        validate(self.store.as_ref(), token)
            .await?
            .ok_or_else(|| QueryError::InvalidDate {
                bound,
                token: token.to_owned(),
            })
    }
}

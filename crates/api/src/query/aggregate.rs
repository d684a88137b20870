use itertools::Itertools;
use serde::Serialize;
use utoipa::ToSchema;

use super::{CanonicalDate, DateWindow};
use crate::db::DailyReading;

/// Temperature extremes and mean for a single calendar date.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AggregateRow {
    #[schema(value_type = String, example = "2017-08-23")]
    pub date: CanonicalDate,
    #[serde(rename = "TMIN")]
    pub min: f64,
    #[serde(rename = "TAVG")]
    pub avg: f64,
    #[serde(rename = "TMAX")]
    pub max: f64,
}

/// Group temperature readings by date and reduce each group to min/avg/max.
///
/// Readings outside `window` or without a temperature are ignored, and a date
/// left with no temperatures produces no row. Rows come back ascending by
/// date with one row per date, regardless of the input order.
pub fn summarize(window: &DateWindow, readings: Vec<DailyReading>) -> Vec<AggregateRow> {
    let mut temperatures: Vec<(CanonicalDate, f64)> = readings
        .into_iter()
        .filter(|reading| window.contains(&reading.date))
        .filter_map(|reading| reading.value.map(|value| (reading.date, value)))
        .collect();
    temperatures.sort_by_key(|(date, _)| *date);

    temperatures
        .into_iter()
        .chunk_by(|(date, _)| *date)
        .into_iter()
        .map(|(date, group)| {
            let (min, max, sum, count) = group.fold(
                (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0u32),
                |(min, max, sum, count), (_, value)| {
                    (min.min(value), max.max(value), sum + value, count + 1)
                },
            );
            // summation error can push the mean a hair outside the extremes
            let avg = (sum / f64::from(count)).clamp(min, max);
            AggregateRow {
                date,
                min,
                avg,
                max,
            }
        })
        .collect()
}

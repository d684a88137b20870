//! Date handling, ranking and aggregation behind the climate endpoints.

mod aggregate;
mod bounds;
mod dates;
mod facade;
mod ranking;
mod window;

pub use aggregate::{summarize, AggregateRow};
pub use bounds::{dataset_span, is_in_range, most_recent_date, validate};
pub use dates::{normalize, CanonicalDate, InvalidFormat};
pub use facade::{Bound, ClimateQueries, QueryError, StationTemperatures};
pub use ranking::busiest_station;
pub use window::{trailing_year, DateWindow, TRAILING_WINDOW_DAYS};

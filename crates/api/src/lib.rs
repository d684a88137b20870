pub mod db;
pub mod query;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use db::{ClimateAccess, ClimateData, DailyReading, Station, StationCount};
pub use query::{AggregateRow, Bound, CanonicalDate, ClimateQueries, DateWindow, QueryError};
pub use routes::*;
pub use startup::*;
pub use utils::*;

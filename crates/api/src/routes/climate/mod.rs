pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use precipitation::precipitation;
pub use stations::stations;
pub use temperature::{range_summary, start_summary};
pub use tobs::tobs;

use axum::http::StatusCode;
use log::error;

use crate::query::QueryError;

/// Failures that are not the caller's fault: storage errors and an empty dataset.
pub(crate) fn internal_error(err: QueryError) -> (StatusCode, String) {
    error!("error answering climate query: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to query climate data: {}", err),
    )
}

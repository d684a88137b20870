use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::internal_error;
use crate::{db::DailyReading, AppState};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation of every observation in the final 365 days of the dataset, as single-key {date: precipitation} objects", content_type = "application/json"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read observations")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DailyReading>>, (StatusCode, String)> {
    state
        .queries
        .precipitation_series()
        .await
        .map(Json)
        .map_err(internal_error)
}

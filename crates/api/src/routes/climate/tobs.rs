use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::internal_error;
use crate::{query::StationTemperatures, AppState};

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperatures over the final 365 days of the dataset for the station with the most observations, as {station: [{date: temperature}]}", content_type = "application/json"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read observations")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StationTemperatures>, (StatusCode, String)> {
    state
        .queries
        .busiest_station_temps()
        .await
        .map(Json)
        .map_err(internal_error)
}

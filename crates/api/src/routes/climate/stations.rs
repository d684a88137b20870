use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::internal_error;
use crate::{db::Station, AppState};

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "All weather stations", content_type = "application/json", body = Vec<Station>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read stations")
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Station>>, (StatusCode, String)> {
    state
        .queries
        .station_list()
        .await
        .map(Json)
        .map_err(internal_error)
}

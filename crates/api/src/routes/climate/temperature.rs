use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use log::warn;
use std::sync::Arc;

use super::internal_error;
use crate::{
    query::{AggregateRow, Bound, QueryError},
    templates::{
        empty_range_page, invalid_range_end_page, invalid_range_start_page, invalid_start_page,
    },
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First date to summarize, MMDDYYYY"),
    ),
    responses(
        (status = OK, description = "Daily TMIN/TAVG/TMAX from start onward; a text error body when start is malformed or not in the dataset", body = Vec<AggregateRow>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read observations")
    ))]
pub async fn start_summary(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    match state.queries.single_bound_aggregate(&start).await {
        Ok(rows) => Ok(Json(rows).into_response()),
        Err(QueryError::InvalidDate { token, .. }) => {
            warn!("rejected start date: {}", token);
            Ok(Html(invalid_start_page(&token).into_string()).into_response())
        }
        Err(e) => Err(internal_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First date to summarize, MMDDYYYY"),
        ("end" = String, Path, description = "Last date to summarize, MMDDYYYY"),
    ),
    responses(
        (status = OK, description = "Daily TMIN/TAVG/TMAX from start through end; a text error body when either date is rejected or the range is empty", body = Vec<AggregateRow>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read observations")
    ))]
pub async fn range_summary(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Response, (StatusCode, String)> {
    let page = match state.queries.two_bound_aggregate(&start, &end).await {
        Ok(rows) => return Ok(Json(rows).into_response()),
        Err(QueryError::InvalidDate { bound, token }) => {
            warn!("rejected {} date: {}", bound, token);
            match bound {
                Bound::Start => invalid_range_start_page(&token),
                Bound::End => invalid_range_end_page(&token),
            }
        }
        Err(QueryError::EmptyRange { start, end }) => empty_range_page(&start, &end),
        Err(e) => return Err(internal_error(e)),
    };
    Ok(Html(page.into_string()).into_response())
}

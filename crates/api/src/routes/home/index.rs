use std::sync::Arc;

use axum::{extract::State, response::Html};
use log::warn;

use crate::{templates::home_page, AppState};

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let span = state.queries.dataset_span().await.unwrap_or_else(|e| {
        warn!("dataset span unavailable: {}", e);
        None
    });
    Html(home_page(&state.remote_url, span).into_string())
}

use crate::{
    db::{self, ClimateAccess, ClimateData},
    index_handler, precipitation,
    query::{AggregateRow, ClimateQueries},
    range_summary, routes, start_summary, stations, tobs, Cli,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method, StatusCode,
};
use log::info;
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub request_timeout: Duration,
    pub queries: Arc<ClimateQueries>,
}

impl AppState {
    pub fn new(remote_url: String, request_timeout: Duration, store: Arc<dyn ClimateData>) -> Self {
        Self {
            remote_url,
            request_timeout,
            queries: Arc::new(ClimateQueries::new(store)),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::precipitation::precipitation,
        routes::climate::stations::stations,
        routes::climate::tobs::tobs,
        routes::climate::temperature::start_summary,
        routes::climate::temperature::range_summary,
    ),
    components(
        schemas(
                db::Station,
                AggregateRow,
            )
    ),
    tags(
        (name = "climate api", description = "a read-only RESTful api over historical daily precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(cli: &Cli) -> Result<AppState, anyhow::Error> {
    let database = cli.database();
    let store = ClimateAccess::connect(&database, cli.max_connections())
        .await
        .map_err(|e| anyhow!("error opening climate database {}: {}", database, e))?;

    store
        .verify_schema()
        .await
        .map_err(|e| anyhow!("climate database {} has an unexpected schema: {}", database, e))?;

    Ok(AppState::new(
        cli.remote_url(),
        cli.request_timeout(),
        Arc::new(store),
    ))
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let request_timeout = app_state.request_timeout;
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(start_summary))
        .route("/api/v1.0/{start}/{end}", get(range_summary))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}

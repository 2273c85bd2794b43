use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::presentation::handlers::{
    batch_results_handler, batch_status_handler, cancel_batch_handler, create_batch_handler,
    health_handler, pages_csv_handler, projects_csv_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state.max_request_bytes();

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/batches", post(create_batch_handler))
        .route("/api/v1/batches/{batch_id}", get(batch_status_handler))
        .route(
            "/api/v1/batches/{batch_id}/results",
            get(batch_results_handler),
        )
        .route(
            "/api/v1/batches/{batch_id}/pages.csv",
            get(pages_csv_handler),
        )
        .route(
            "/api/v1/batches/{batch_id}/projects.csv",
            get(projects_csv_handler),
        )
        .route(
            "/api/v1/batches/{batch_id}/cancel",
            post(cancel_batch_handler),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

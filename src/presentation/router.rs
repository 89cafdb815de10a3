use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{ConnectivityProber, TableStore, VisionClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    export_handler, extract_handler, health_handler, models_handler, save_handler, status_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<C, P, S>(state: AppState<C, P, S>) -> Router
where
    C: VisionClient + 'static,
    P: ConnectivityProber + 'static,
    S: TableStore + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/status", get(status_handler::<C, P, S>))
        .route("/api/v1/models", get(models_handler::<C, P, S>))
        .route("/api/v1/extract", post(extract_handler::<C, P, S>))
        .route("/api/v1/save", post(save_handler::<C, P, S>))
        .route("/api/v1/export", get(export_handler::<C, P, S>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

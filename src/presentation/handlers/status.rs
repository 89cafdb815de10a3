use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{ConnectivityProber, TableStore, VisionClient};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub host: String,
    pub current_model: String,
}

#[tracing::instrument(skip(state))]
pub async fn status_handler<C, P, S>(State(state): State<AppState<C, P, S>>) -> impl IntoResponse
where
    C: VisionClient + 'static,
    P: ConnectivityProber + 'static,
    S: TableStore + 'static,
{
    let report = state.prober.probe().await;

    (
        StatusCode::OK,
        Json(StatusResponse {
            status: report.status.as_str().to_string(),
            host: state.settings.ollama.host.clone(),
            current_model: state.settings.ollama.model.clone(),
        }),
    )
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{ConnectivityProber, TableStore, VisionClient};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ModelsResponse {
    pub status: String,
    pub models: Vec<ModelEntry>,
    pub count: usize,
    pub current_model: String,
}

#[derive(Serialize)]
pub struct ModelEntry {
    pub name: String,
    pub size: u64,
    pub parameter_size: String,
    pub quantization_level: String,
}

/// Model inventory of the inference endpoint. An offline endpoint is a
/// normal answer here, not a failure.
#[tracing::instrument(skip(state))]
pub async fn models_handler<C, P, S>(State(state): State<AppState<C, P, S>>) -> impl IntoResponse
where
    C: VisionClient + 'static,
    P: ConnectivityProber + 'static,
    S: TableStore + 'static,
{
    let report = state.prober.probe().await;
    let models: Vec<ModelEntry> = report
        .models
        .into_iter()
        .map(|model| ModelEntry {
            name: model.name,
            size: model.size_bytes,
            parameter_size: model.parameter_size,
            quantization_level: model.quantization_level,
        })
        .collect();

    (
        StatusCode::OK,
        Json(ModelsResponse {
            status: report.status.as_str().to_string(),
            count: models.len(),
            models,
            current_model: state.settings.ollama.model.clone(),
        }),
    )
}

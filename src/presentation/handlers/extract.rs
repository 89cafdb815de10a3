use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ConnectivityProber, TableStore, VisionClient, VisionClientError};
use crate::application::services::{ExtractionError, ExtractionRequest};
use crate::domain::{HeaderSpec, Table};
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ExtractRequest {
    pub image: String,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Serialize)]
pub struct ExtractResponse {
    pub headers: Vec<String>,
    pub rows: Vec<RowDto>,
}

#[derive(Serialize)]
pub struct RowDto {
    pub cells: Vec<CellDto>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDto {
    pub value: String,
    pub confidence: f64,
    pub low_confidence: bool,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn extract_handler<C, P, S>(
    State(state): State<AppState<C, P, S>>,
    Json(request): Json<ExtractRequest>,
) -> impl IntoResponse
where
    C: VisionClient + 'static,
    P: ConnectivityProber + 'static,
    S: TableStore + 'static,
{
    let image = match decode_image(&request.image) {
        Ok(bytes) => bytes,
        Err(message) => {
            tracing::warn!(error = %message, "Rejecting extract request");
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
                .into_response();
        }
    };

    tracing::debug!(
        image_bytes = image.len(),
        columns = request.headers.len(),
        "Starting extraction"
    );

    let extraction = ExtractionRequest {
        image,
        headers: HeaderSpec::from_list(request.headers),
        instructions: request.instructions,
        model: request.model,
        threshold: request.threshold,
    };

    match state.extraction_service.extract(extraction).await {
        Ok(table) => (StatusCode::OK, Json(to_response(table))).into_response(),
        Err(e) => {
            let status = error_status(&e);
            tracing::error!(error = %e, status = %status, "Extraction failed");
            (status, Json(ErrorResponse { error: e.to_string() })).into_response()
        }
    }
}

fn error_status(error: &ExtractionError) -> StatusCode {
    match error {
        ExtractionError::Inference(VisionClientError::ModelUnavailable(_)) => {
            StatusCode::BAD_REQUEST
        }
        ExtractionError::Inference(VisionClientError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        ExtractionError::Inference(VisionClientError::UnreachableEndpoint(_)) => {
            StatusCode::BAD_GATEWAY
        }
        ExtractionError::Parse(_) => StatusCode::BAD_GATEWAY,
        ExtractionError::Resolve(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// Browser uploads arrive as data URLs; the payload after the comma is the
/// base64 image.
fn decode_image(image: &str) -> Result<Vec<u8>, String> {
    let payload = match image.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:image") => rest,
        _ => image,
    };

    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| format!("invalid base64 image payload: {e}"))?;

    if bytes.is_empty() {
        return Err("no image supplied".to_string());
    }

    Ok(bytes)
}

fn to_response(table: Table) -> ExtractResponse {
    ExtractResponse {
        headers: table.headers,
        rows: table
            .rows
            .into_iter()
            .map(|row| RowDto {
                cells: row
                    .cells
                    .into_iter()
                    .map(|cell| CellDto {
                        value: cell.value,
                        confidence: cell.confidence,
                        low_confidence: cell.low_confidence,
                    })
                    .collect(),
            })
            .collect(),
    }
}

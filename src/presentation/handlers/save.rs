use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ConnectivityProber, TableStore, TableStoreError, VisionClient};
use crate::domain::{Cell, Row, Table};
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct SaveRequest {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub rows_written: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Persists the rows the caller kept after reviewing an extraction preview.
/// This is the only operation that mutates the store.
#[tracing::instrument(skip(state, request))]
pub async fn save_handler<C, P, S>(
    State(state): State<AppState<C, P, S>>,
    Json(request): Json<SaveRequest>,
) -> impl IntoResponse
where
    C: VisionClient + 'static,
    P: ConnectivityProber + 'static,
    S: TableStore + 'static,
{
    if request.headers.is_empty() {
        tracing::warn!("Save request without headers");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "no headers supplied".to_string(),
            }),
        )
            .into_response();
    }

    let width = request.headers.len();
    let rows = request
        .rows
        .into_iter()
        .map(|values| {
            let mut cells: Vec<Cell> = values
                .into_iter()
                .take(width)
                .map(|value| Cell::new(value, 1.0))
                .collect();
            while cells.len() < width {
                cells.push(Cell::new(String::new(), 1.0));
            }
            Row::new(cells)
        })
        .collect();

    let table = Table::new(request.headers, rows);

    match state.table_store.append(&table).await {
        Ok(rows_written) => {
            tracing::info!(rows_written, "Save succeeded");
            (StatusCode::OK, Json(SaveResponse { rows_written })).into_response()
        }
        Err(e @ TableStoreError::HeaderMismatch { .. }) => {
            tracing::warn!(error = %e, "Save rejected");
            (
                StatusCode::CONFLICT,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Save failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response()
        }
    }
}

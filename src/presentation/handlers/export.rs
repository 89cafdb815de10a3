use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{ConnectivityProber, TableStore, TableStoreError, VisionClient};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state))]
pub async fn export_handler<C, P, S>(State(state): State<AppState<C, P, S>>) -> impl IntoResponse
where
    C: VisionClient + 'static,
    P: ConnectivityProber + 'static,
    S: TableStore + 'static,
{
    match state.table_store.export().await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    "text/csv; charset=utf-8".to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"results.csv\"".to_string(),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(TableStoreError::StoreMissing) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "no rows saved yet".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Export failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response()
        }
    }
}

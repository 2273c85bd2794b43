use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{BatchId, BatchRun};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn parse_batch_id(raw: &str) -> Result<BatchId, Response> {
    Uuid::parse_str(raw)
        .map(BatchId::from_uuid)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, format!("Invalid batch ID: {}", raw)))
}

/// Resolves the path segment to a stored run, answering 400/404/500 otherwise.
pub async fn load_batch(state: &AppState, raw_id: &str) -> Result<BatchRun, Response> {
    let batch_id = parse_batch_id(raw_id)?;

    match state.batch_repository.get(batch_id).await {
        Ok(Some(run)) => Ok(run),
        Ok(None) => Err(error_response(
            StatusCode::NOT_FOUND,
            format!("Batch not found: {}", raw_id),
        )),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch batch");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch batch: {}", e),
            ))
        }
    }
}

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tokio::sync::mpsc::error::TrySendError;

use crate::application::services::BatchMessage;
use crate::domain::{BatchRun, BatchStatus, ContentType, UploadedDocument};
use crate::presentation::state::AppState;

use super::error_response::{error_response, load_batch, parse_batch_id};

#[derive(Serialize)]
pub struct CreateBatchResponse {
    pub batch_id: String,
    pub documents: Vec<String>,
    pub message: String,
}

#[derive(Serialize)]
pub struct BatchStatusResponse {
    pub batch_id: String,
    pub status: String,
    pub progress: f64,
    pub completed_pages: usize,
    pub total_pages: usize,
    pub document_count: usize,
    pub page_results: usize,
    pub project_records: usize,
    pub warnings: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct PageResultDto {
    pub filename: String,
    pub page: u32,
    pub summary: String,
    pub include_or_exclude: String,
    pub reason: String,
}

#[derive(Serialize)]
pub struct ProjectRecordDto {
    pub filename: String,
    pub page: u32,
    pub project: String,
}

#[derive(Serialize)]
pub struct BatchResultsResponse {
    pub batch_id: String,
    pub status: String,
    pub pages: Vec<PageResultDto>,
    pub projects: Vec<ProjectRecordDto>,
}

#[derive(Serialize)]
pub struct CancelBatchResponse {
    pub batch_id: String,
    pub message: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn create_batch_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let documents = match read_documents(multipart, state.max_file_bytes()).await {
        Ok(documents) => documents,
        Err(response) => return response,
    };

    if documents.is_empty() {
        tracing::warn!("Batch request with no files");
        return error_response(StatusCode::BAD_REQUEST, "No files uploaded");
    }

    let run = BatchRun::new(documents.len());
    let batch_id = run.id;
    let filenames: Vec<String> = documents.iter().map(|d| d.filename().to_string()).collect();

    if let Err(e) = state.batch_repository.create(&run).await {
        tracing::error!(error = %e, "Failed to create batch record");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create batch: {}", e),
        );
    }

    let cancel = state.cancellations.register(batch_id);
    let msg = BatchMessage {
        batch_id,
        documents,
        cancel,
    };

    if let Err(e) = state.batch_sender.try_send(msg) {
        let reason = match e {
            TrySendError::Full(_) => "Batch queue full, retry later",
            TrySendError::Closed(_) => "Batch worker unavailable",
        };
        tracing::error!(batch_id = %batch_id, reason, "Failed to enqueue batch");
        state.cancellations.release(batch_id);
        // Never queued, so the run must not stay Idle.
        if let Err(e) = state
            .batch_repository
            .set_status(batch_id, BatchStatus::Cancelled)
            .await
        {
            tracing::warn!(error = %e, "Failed to mark rejected batch");
        }
        return error_response(StatusCode::SERVICE_UNAVAILABLE, reason);
    }

    tracing::info!(
        batch_id = %batch_id,
        documents = filenames.len(),
        "Batch enqueued"
    );

    (
        StatusCode::ACCEPTED,
        Json(CreateBatchResponse {
            batch_id: batch_id.to_string(),
            documents: filenames,
            message: "Batch analysis started".to_string(),
        }),
    )
        .into_response()
}

async fn read_documents(
    mut multipart: Multipart,
    max_file_bytes: usize,
) -> Result<Vec<UploadedDocument>, Response> {
    let mut documents = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    e.status(),
                    format!("Failed to read multipart: {}", e.body_text()),
                ));
            }
        };

        let Some(filename) = field.file_name().map(str::to_string) else {
            tracing::debug!(field = ?field.name(), "Skipping non-file multipart field");
            continue;
        };

        let mime = field.content_type().unwrap_or("application/octet-stream").to_string();
        let Some(content_type) =
            ContentType::from_mime(&mime).or_else(|| ContentType::from_filename(&filename))
        else {
            tracing::warn!(filename = %filename, content_type = %mime, "Unsupported content type");
            return Err(error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported content type for {}: {}", filename, mime),
            ));
        };

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, filename = %filename, "Failed to read file bytes");
                return Err(error_response(
                    e.status(),
                    format!("Failed to read file {}: {}", filename, e.body_text()),
                ));
            }
        };

        if data.len() > max_file_bytes {
            tracing::warn!(filename = %filename, bytes = data.len(), "File exceeds size limit");
            return Err(error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!(
                    "{} exceeds the maximum file size of {} bytes",
                    filename, max_file_bytes
                ),
            ));
        }

        tracing::debug!(filename = %filename, bytes = data.len(), "File received");
        documents.push(UploadedDocument::new(filename, content_type, data.to_vec()));
    }

    Ok(documents)
}

#[tracing::instrument(skip(state))]
pub async fn batch_status_handler(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> Response {
    let run = match load_batch(&state, &batch_id).await {
        Ok(run) => run,
        Err(response) => return response,
    };

    let response = BatchStatusResponse {
        batch_id: run.id.to_string(),
        status: run.status.as_str().to_string(),
        progress: run.progress_fraction(),
        completed_pages: run.progress.completed_pages,
        total_pages: run.progress.total_pages,
        document_count: run.document_count,
        page_results: run.page_results.len(),
        project_records: run.project_records.len(),
        warnings: run.warnings.iter().map(ToString::to_string).collect(),
        created_at: run.created_at.to_rfc3339(),
        updated_at: run.updated_at.to_rfc3339(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn batch_results_handler(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> Response {
    let run = match load_batch(&state, &batch_id).await {
        Ok(run) => run,
        Err(response) => return response,
    };

    let pages = run
        .page_results
        .into_iter()
        .map(|record| PageResultDto {
            include_or_exclude: record.verdict.as_str().to_string(),
            filename: record.source_document,
            page: record.page_number,
            summary: record.summary,
            reason: record.reason,
        })
        .collect();

    let projects = run
        .project_records
        .into_iter()
        .map(|record| ProjectRecordDto {
            filename: record.source_document,
            page: record.page_number,
            project: record.description,
        })
        .collect();

    let response = BatchResultsResponse {
        batch_id: run.id.to_string(),
        status: run.status.as_str().to_string(),
        pages,
        projects,
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[tracing::instrument(skip(state))]
pub async fn cancel_batch_handler(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> Response {
    let id = match parse_batch_id(&batch_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    if !state.cancellations.cancel(id) {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("No running batch with ID: {}", batch_id),
        );
    }

    tracing::info!(batch_id = %id, "Batch cancellation requested");

    (
        StatusCode::ACCEPTED,
        Json(CancelBatchResponse {
            batch_id: id.to_string(),
            message: "Cancellation requested".to_string(),
        }),
    )
        .into_response()
}

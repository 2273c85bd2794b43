use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::infrastructure::export::{CsvExporter, ExportError};
use crate::presentation::state::AppState;

use super::error_response::{error_response, load_batch};

#[tracing::instrument(skip(state))]
pub async fn pages_csv_handler(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> Response {
    let run = match load_batch(&state, &batch_id).await {
        Ok(run) => run,
        Err(response) => return response,
    };

    csv_attachment(
        CsvExporter::pages_csv(&run.page_results),
        &format!("{}-pages.csv", run.id),
    )
}

#[tracing::instrument(skip(state))]
pub async fn projects_csv_handler(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> Response {
    let run = match load_batch(&state, &batch_id).await {
        Ok(run) => run,
        Err(response) => return response,
    };

    csv_attachment(
        CsvExporter::projects_csv(&run.project_records),
        &format!("{}-projects.csv", run.id),
    )
}

fn csv_attachment(rendered: Result<String, ExportError>, filename: &str) -> Response {
    match rendered {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render CSV export");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to export: {}", e),
            )
        }
    }
}

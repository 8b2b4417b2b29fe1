//! Axum route handlers for the batch parsing API.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{rows_to_csv, rows_to_xlsx};
use crate::pipeline::{process_batch, BatchSummary, UploadedFile};
use crate::state::AppState;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Serialize)]
pub struct CreateBatchResponse {
    pub batch_id: Uuid,
    #[serde(flatten)]
    pub summary: BatchSummary,
}

/// POST /api/v1/batches
///
/// Multipart upload of one or more resumes (pdf/docx/txt). Runs the full
/// pipeline, stores the result as a session, and returns the table with a
/// success/failure summary.
pub async fn handle_create_batch(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CreateBatchResponse>, AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart request: {e}")))?
    {
        // Parts without a filename are form metadata, not documents.
        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let content_type = field.content_type().map(String::from);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read '{filename}': {e}")))?;
        files.push(UploadedFile {
            filename,
            content_type,
            data,
        });
    }

    if files.is_empty() {
        return Err(AppError::Validation("no files uploaded".to_string()));
    }

    let today = Utc::now().date_naive();
    let summary = process_batch(state.model.as_ref(), files, today).await?;
    info!(
        "batch complete: {} parsed, {} failed",
        summary.parsed, summary.failed
    );

    let batch_id = state.sessions.insert(summary.clone()).await;
    Ok(Json(CreateBatchResponse { batch_id, summary }))
}

/// GET /api/v1/batches/:id
pub async fn handle_get_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> Result<Json<BatchSummary>, AppError> {
    let summary = fetch_batch(&state, batch_id).await?;
    Ok(Json(summary))
}

/// GET /api/v1/batches/:id/export.csv
pub async fn handle_export_csv(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let summary = fetch_batch(&state, batch_id).await?;
    let bytes = rows_to_csv(&summary.rows)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resume_data.csv\"",
            ),
        ],
        bytes,
    ))
}

/// GET /api/v1/batches/:id/export.xlsx
pub async fn handle_export_xlsx(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let summary = fetch_batch(&state, batch_id).await?;
    let bytes = rows_to_xlsx(&summary.rows)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("XLSX export failed: {e}")))?;
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"Resume_Data.xlsx\"",
            ),
        ],
        bytes,
    ))
}

/// DELETE /api/v1/batches/:id
///
/// Session reset: drops the stored batch.
pub async fn handle_delete_batch(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(batch_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Batch {batch_id} not found")))
    }
}

async fn fetch_batch(state: &AppState, batch_id: Uuid) -> Result<BatchSummary, AppError> {
    state
        .sessions
        .get(batch_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Batch {batch_id} not found")))
}

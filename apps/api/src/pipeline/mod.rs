//! Batch Orchestrator — runs each uploaded file through extraction, the
//! model call, sanitization, and normalization.
//!
//! Failure isolation contract: any single file's failure (unsupported type,
//! empty extraction, model error, unrepairable response) marks that file
//! failed and moves on. Only a batch with zero successes surfaces an error.
//! The output table keeps original submission order.

use bytes::Bytes;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::extract::{extract_resume_text, FileKind};
use crate::llm_client::ResumeModel;
use crate::models::candidate::{CandidateRecord, ParsedRow};
use crate::parser::{format_experience, sanitize_model_response, total_experience_years};

/// One uploaded document, as received from the multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// The result of one batch run: the normalized table plus counts for the
/// user-visible success/failure summary.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub rows: Vec<ParsedRow>,
    pub parsed: usize,
    pub failed: usize,
}

pub async fn process_batch(
    model: &dyn ResumeModel,
    files: Vec<UploadedFile>,
    today: NaiveDate,
) -> Result<BatchSummary, AppError> {
    let date = today.format("%Y-%m-%d").to_string();
    let mut rows: Vec<ParsedRow> = Vec::new();
    let mut failed = 0usize;

    for file in &files {
        match process_file(model, file).await {
            Ok(record) => {
                debug!("parsed {}", file.filename);
                let sno = rows.len() + 1;
                rows.push(normalize_record(record, &file.filename, sno, &date, today));
            }
            Err(reason) => {
                warn!("failed to process {}: {reason:#}", file.filename);
                failed += 1;
            }
        }
    }

    if rows.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "no resumes could be parsed".to_string(),
        ));
    }

    let parsed = rows.len();
    Ok(BatchSummary {
        rows,
        parsed,
        failed,
    })
}

async fn process_file(
    model: &dyn ResumeModel,
    file: &UploadedFile,
) -> anyhow::Result<CandidateRecord> {
    let kind = FileKind::detect(&file.filename, file.content_type.as_deref(), &file.data)
        .ok_or_else(|| anyhow::anyhow!("unsupported file type"))?;
    let text = extract_resume_text(kind, &file.data)?;
    let raw = model.extract_candidate(&text).await?;
    Ok(sanitize_model_response(&raw)?)
}

/// Extends a sanitized record with its derived fields and table position.
/// Pure given `today`, so re-running on the same record is idempotent.
fn normalize_record(
    record: CandidateRecord,
    filename: &str,
    sno: usize,
    date: &str,
    today: NaiveDate,
) -> ParsedRow {
    ParsedRow {
        sno,
        date: date.to_string(),
        experience_in_years: total_experience_years(&record.experience, today),
        experience: format_experience(&record.experience),
        skills: record.skills.join(", "),
        name: record.name,
        email: record.email,
        phone: record.phone,
        filename: filename.to_string(),
    }
}

//! Axum route handlers for resume upload and history.

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::{analyze_file, ResumeAnalysis};
use crate::errors::AppError;
use crate::models::resume::{HistoryEntry, NewResumeRecord};
use crate::routes::rollback;
use crate::state::AppState;
use crate::store::StoreError;
use crate::upload::ScratchUpload;

pub const UPLOAD_OK: &str = "Resume uploaded successfully";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub analysis: ResumeAnalysis,
    pub improvements: Vec<String>,
}

/// Validated multipart payload of `POST /upload`.
#[derive(Debug)]
struct UploadForm {
    filename: String,
    bytes: Bytes,
    user_id: i64,
}

/// POST /upload
///
/// Multipart fields: `file` (a `.pdf`) and `user_id` (`userId` also accepted).
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_upload_form(&mut multipart, state.config.max_upload_bytes).await?;
    info!(
        "Received {} ({} bytes) for user {}",
        form.filename,
        form.bytes.len(),
        form.user_id
    );

    let scratch = ScratchUpload::write(&state.config.upload_dir, &form.filename, &form.bytes)
        .await
        .context("write upload to scratch file")?;
    let outcome = analyze_file(state.extractor.as_ref(), &state.analysis, scratch.path()).await;
    if let Err(e) = scratch.close() {
        warn!("Failed to remove scratch upload for {}: {e}", form.filename);
    }
    let outcome = outcome?;

    let record = NewResumeRecord {
        user_id: form.user_id,
        filename: form.filename,
        content: outcome.text,
        score: outcome.analysis.overall_score,
        improvements: outcome.improvements,
    };

    let mut tx = state.store.begin().await?;
    let saved = match tx.create_resume_record(&record).await {
        Ok(saved) => saved,
        Err(e) => {
            rollback(tx).await;
            return Err(e.into());
        }
    };
    tx.commit().await?;

    info!(
        "Stored resume {} for user {} (score {:.1})",
        saved.id, saved.user_id, saved.score
    );

    Ok(Json(UploadResponse {
        message: UPLOAD_OK.to_string(),
        analysis: outcome.analysis,
        improvements: record.improvements,
    }))
}

/// GET /history/:user_id
pub async fn handle_history(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let records = state.store.list_resume_records_by_user(user_id).await?;
    let entries = records
        .into_iter()
        .map(HistoryEntry::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(StoreError::from)?;
    Ok(Json(entries))
}

/// GET /analyze/:resume_id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(resume_id): Path<i64>,
) -> Result<Json<HistoryEntry>, AppError> {
    let record = state
        .store
        .find_resume_record(resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    let entry = HistoryEntry::try_from(record).map_err(StoreError::from)?;
    Ok(Json(entry))
}

/// Reads the upload form. The filename is checked as soon as the `file`
/// field header arrives, before its bytes are consumed.
async fn read_upload_form(
    multipart: &mut Multipart,
    limit: usize,
) -> Result<UploadForm, AppError> {
    let form_error = |e: MultipartError| multipart_error(e, limit);
    let mut file: Option<(String, Bytes)> = None;
    let mut user_id: Option<i64> = None;

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().map(str::to_string).ok_or_else(|| {
                    AppError::UnprocessableEntity("file field has no filename".to_string())
                })?;
                if !is_pdf_filename(&filename) {
                    return Err(AppError::Validation(
                        "Only PDF files are allowed".to_string(),
                    ));
                }
                let bytes = field.bytes().await.map_err(form_error)?;
                file = Some((filename, bytes));
            }
            Some("user_id") | Some("userId") => {
                let raw = field.text().await.map_err(form_error)?;
                let parsed = raw.trim().parse::<i64>().map_err(|_| {
                    AppError::UnprocessableEntity(format!("user_id must be an integer, got '{raw}'"))
                })?;
                user_id = Some(parsed);
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| AppError::UnprocessableEntity("file is required".to_string()))?;
    let user_id =
        user_id.ok_or_else(|| AppError::UnprocessableEntity("user_id is required".to_string()))?;

    Ok(UploadForm {
        filename,
        bytes,
        user_id,
    })
}

fn is_pdf_filename(filename: &str) -> bool {
    filename.ends_with(".pdf")
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds {limit} bytes"))
    } else {
        AppError::UnprocessableEntity(format!("Malformed multipart body: {}", e.body_text()))
    }
}

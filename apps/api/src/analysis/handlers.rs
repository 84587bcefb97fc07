//! Axum route handlers for the resume analysis API.

use anyhow::Context;
use axum::extract::{multipart::MultipartError, Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;
use crate::analysis::pipeline::run_analysis;
use crate::errors::AppError;
use crate::extraction::is_pdf;
use crate::render::RenderedDocument;
use crate::state::AppState;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

pub const MISSING_INPUT_MESSAGE: &str = "Please provide both a resume and a job description.";
pub const INVALID_PDF_MESSAGE: &str = "Please upload a valid PDF file.";
pub const UPLOAD_TOO_LARGE_MESSAGE: &str = "The uploaded file is too large.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Raw multipart fields, before any validation.
#[derive(Debug, Default)]
pub struct AnalysisUpload {
    pub resume: Option<UploadedFile>,
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    /// Pass back to `/api/v1/mcqs` to generate questions for the same job description.
    pub session_id: Uuid,
    pub report: RenderedDocument,
    pub analysis: AnalysisResult,
    pub analysis_complete: bool,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis
///
/// Multipart body: a `resume` PDF file part and a `job_description` text part.
/// The upload lives in a temp file only for the duration of text extraction.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    let (resume, job_description) = validate_upload(upload)?;

    let temp = write_temp_pdf(&resume.bytes).await?;
    let outcome = run_analysis(
        state.extractor.as_ref(),
        state.llm.as_ref(),
        temp.path(),
        &job_description,
    )
    .await;
    drop(temp);
    let outcome = outcome?;

    let session_id = state.sessions.insert(job_description).await;
    info!(%session_id, file = %resume.file_name, "Resume analysis complete");

    Ok(Json(AnalysisResponse {
        session_id,
        report: outcome.report,
        analysis: outcome.analysis,
        analysis_complete: true,
        generated_at: Utc::now(),
    }))
}

async fn read_upload(multipart: &mut Multipart) -> Result<AnalysisUpload, AppError> {
    let mut upload = AnalysisUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(invalid_multipart)?;
                upload.resume = Some(UploadedFile { file_name, bytes });
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                upload.job_description = Some(field.text().await.map_err(invalid_multipart)?);
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// Checks that both inputs are present and that the file is a PDF.
pub fn validate_upload(upload: AnalysisUpload) -> Result<(UploadedFile, String), AppError> {
    let resume = upload.resume.filter(|f| !f.file_name.is_empty());
    let job_description = upload.job_description.filter(|jd| !jd.trim().is_empty());

    let (Some(resume), Some(job_description)) = (resume, job_description) else {
        warn!("Rejected analysis request with missing input");
        return Err(AppError::Validation(MISSING_INPUT_MESSAGE.to_string()));
    };

    if !is_pdf(&resume.file_name, &resume.bytes) {
        warn!(file = %resume.file_name, "Rejected non-PDF upload");
        return Err(AppError::Validation(INVALID_PDF_MESSAGE.to_string()));
    }

    Ok((resume, job_description))
}

async fn write_temp_pdf(bytes: &[u8]) -> Result<NamedTempFile, AppError> {
    let temp = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(".pdf")
        .tempfile()
        .context("Failed to create temp file for upload")?;
    tokio::fs::write(temp.path(), bytes)
        .await
        .context("Failed to write uploaded PDF")?;
    Ok(temp)
}

fn invalid_multipart(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Rejected oversized upload: {err}");
        return AppError::PayloadTooLarge(UPLOAD_TOO_LARGE_MESSAGE.to_string());
    }
    AppError::Validation(format!("Invalid multipart body: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(file_name: Option<&str>, bytes: &'static [u8], jd: Option<&str>) -> AnalysisUpload {
        AnalysisUpload {
            resume: file_name.map(|name| UploadedFile {
                file_name: name.to_string(),
                bytes: Bytes::from_static(bytes),
            }),
            job_description: jd.map(str::to_string),
        }
    }

    fn validation_message(result: Result<(UploadedFile, String), AppError>) -> String {
        match result {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_upload_passes() {
        let (file, jd) = validate_upload(upload(Some("cv.pdf"), b"%PDF-1.7", Some("Rust dev"))).unwrap();
        assert_eq!(file.file_name, "cv.pdf");
        assert_eq!(jd, "Rust dev");
    }

    #[test]
    fn test_missing_job_description_is_rejected() {
        let msg = validation_message(validate_upload(upload(Some("cv.pdf"), b"%PDF", None)));
        assert_eq!(msg, MISSING_INPUT_MESSAGE);
    }

    #[test]
    fn test_blank_job_description_is_rejected() {
        let msg = validation_message(validate_upload(upload(Some("cv.pdf"), b"%PDF", Some("  \n"))));
        assert_eq!(msg, MISSING_INPUT_MESSAGE);
    }

    #[test]
    fn test_missing_resume_is_rejected() {
        let msg = validation_message(validate_upload(upload(None, b"", Some("Rust dev"))));
        assert_eq!(msg, MISSING_INPUT_MESSAGE);
    }

    #[test]
    fn test_empty_file_name_counts_as_missing() {
        let msg = validation_message(validate_upload(upload(Some(""), b"%PDF", Some("Rust dev"))));
        assert_eq!(msg, MISSING_INPUT_MESSAGE);
    }

    #[test]
    fn test_non_pdf_is_rejected() {
        let msg = validation_message(validate_upload(upload(Some("cv.docx"), b"PK\x03\x04", Some("Rust dev"))));
        assert_eq!(msg, INVALID_PDF_MESSAGE);
    }

    #[tokio::test]
    async fn test_temp_pdf_is_removed_on_drop() {
        let temp = write_temp_pdf(b"%PDF-1.4").await.unwrap();
        let path = temp.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
        drop(temp);
        assert!(!path.exists());
    }
}

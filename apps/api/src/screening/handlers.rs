//! Axum route handlers for screening question generation.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::CompletionClient;
use crate::render::RenderedDocument;
use crate::screening::prompts::build_mcq_prompt;
use crate::screening::render::{parse_mcqs, render_mcq_set};
use crate::session::JobDescriptionCache;
use crate::state::AppState;

/// Shown to the user when the model answers with something other than the expected JSON.
pub const MCQ_FORMAT_ERROR: &str = "Error: The MCQ response was not in the correct format.";

pub const NO_JOB_DESCRIPTION_MESSAGE: &str =
    "No job description found. Analyze a resume first or include a job description.";

#[derive(Debug, Deserialize)]
pub struct McqRequest {
    /// Session id returned by `/api/v1/analysis`.
    pub session_id: Option<Uuid>,
    /// Takes precedence over the cached job description when non-blank.
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct McqResponse {
    pub report: RenderedDocument,
    pub question_count: usize,
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/mcqs
pub async fn handle_generate_mcqs(
    State(state): State<AppState>,
    Json(request): Json<McqRequest>,
) -> Result<Json<McqResponse>, AppError> {
    let job_description = resolve_job_description(&state.sessions, request).await?;
    let (report, question_count) = generate_mcqs(state.llm.as_ref(), &job_description).await?;

    info!(question_count, "Screening questions generated");

    Ok(Json(McqResponse {
        report,
        question_count,
        generated_at: Utc::now(),
    }))
}

async fn resolve_job_description(
    sessions: &JobDescriptionCache,
    request: McqRequest,
) -> Result<String, AppError> {
    if let Some(jd) = request.job_description.filter(|jd| !jd.trim().is_empty()) {
        return Ok(jd);
    }
    let cached = match request.session_id {
        Some(id) => sessions.get(id).await,
        None => None,
    };
    cached.ok_or_else(|| AppError::Validation(NO_JOB_DESCRIPTION_MESSAGE.to_string()))
}

/// Prompt → complete → render. Returns the document and how many questions it holds.
pub async fn generate_mcqs(
    llm: &dyn CompletionClient,
    job_description: &str,
) -> Result<(RenderedDocument, usize), AppError> {
    let completion = llm.complete(&build_mcq_prompt(job_description)).await?;

    let set = parse_mcqs(&completion).map_err(|e| {
        warn!("MCQ response was malformed: {e}");
        AppError::MalformedResponse(MCQ_FORMAT_ERROR)
    })?;

    let Some(set) = set else {
        return Ok((RenderedDocument::empty(), 0));
    };

    let odd_shaped = set.mcqs.iter().filter(|q| !q.has_expected_options()).count();
    if odd_shaped > 0 {
        warn!("{odd_shaped} generated question(s) do not have exactly four options");
    }

    Ok((render_mcq_set(&set), set.mcqs.len()))
}

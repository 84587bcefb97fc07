use std::path::Path;

use tracing::{info, warn};

use crate::analysis::models::AnalysisResult;
use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::render::{parse_analysis, render_analysis_result};
use crate::errors::AppError;
use crate::extraction::TextExtractor;
use crate::llm_client::CompletionClient;
use crate::render::RenderedDocument;

/// Shown to the user when the model answers with something other than the expected JSON.
pub const ANALYSIS_FORMAT_ERROR: &str =
    "Error: The AI response was not in the correct format. Please try again.";

pub struct AnalysisOutcome {
    pub analysis: AnalysisResult,
    pub report: RenderedDocument,
}

/// Extract → prompt → complete → render. Either a full report or an error, never half of one.
pub async fn run_analysis(
    extractor: &dyn TextExtractor,
    llm: &dyn CompletionClient,
    pdf_path: &Path,
    job_description: &str,
) -> Result<AnalysisOutcome, AppError> {
    let resume_text = extractor.extract(pdf_path).await?;
    info!("Extracted {} characters of resume text", resume_text.len());

    let prompt = build_analysis_prompt(&resume_text, job_description);
    let completion = llm.complete(&prompt).await?;

    let analysis = parse_analysis(&completion).map_err(|e| {
        warn!("Analysis response was malformed: {e}");
        AppError::MalformedResponse(ANALYSIS_FORMAT_ERROR)
    })?;
    let report = render_analysis_result(&analysis);

    Ok(AnalysisOutcome { analysis, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CannedCompletion, CannedExtractor};

    const RESUME: &str = "Jane Doe\nBackend Intern\nPython, Flask";
    const JD: &str = "Backend engineer. Required: Python, Go.";

    #[tokio::test]
    async fn test_run_analysis_renders_report() {
        let llm = CannedCompletion::ok(r#"{"matchScore": 82, "overallSuggestions": "Learn Go."}"#);
        let outcome = run_analysis(&CannedExtractor(Some(RESUME)), &llm, Path::new("x.pdf"), JD)
            .await
            .unwrap();

        assert_eq!(outcome.analysis.match_score, Some(82.0));
        assert!(outcome.report.as_str().contains("## Overall Match Score: 82%"));

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.contains(RESUME));
        assert!(prompt.contains(JD));
    }

    #[tokio::test]
    async fn test_run_analysis_malformed_json_uses_fixed_message() {
        let llm = CannedCompletion::ok("{not json");
        let err = run_analysis(&CannedExtractor(Some(RESUME)), &llm, Path::new("x.pdf"), JD)
            .await
            .err()
            .unwrap();

        assert!(matches!(err, AppError::MalformedResponse(msg) if msg == ANALYSIS_FORMAT_ERROR));
    }

    #[tokio::test]
    async fn test_run_analysis_propagates_llm_failure() {
        let llm = CannedCompletion::failing(503);
        let err = run_analysis(&CannedExtractor(Some(RESUME)), &llm, Path::new("x.pdf"), JD)
            .await
            .err()
            .unwrap();

        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_run_analysis_skips_model_when_pdf_has_no_text() {
        let llm = CannedCompletion::ok("{}");
        let err = run_analysis(&CannedExtractor(None), &llm, Path::new("x.pdf"), JD)
            .await
            .err()
            .unwrap();

        assert!(matches!(err, AppError::UnprocessableEntity(_)));
        assert!(llm.last_prompt().is_none());
    }
}

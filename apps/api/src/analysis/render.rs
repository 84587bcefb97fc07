//! Markdown rendering of an [`AnalysisResult`].
//!
//! Section order is fixed: score, keywords, suggestions, experience, projects.
//! Missing fields render a placeholder and never fail the report.

use std::fmt;

use crate::analysis::models::{AnalysisResult, ExperienceAnalysis, ProjectAnalysis};
use crate::render::{parse_object, score_or_na, RenderedDocument, ResponseFormatError};

const UNTITLED_EXPERIENCE: &str = "Untitled Experience";
const UNTITLED_PROJECT: &str = "Untitled Project";
/// Only the first suggestions per entry make it into the report.
const MAX_SUGGESTIONS: usize = 2;

/// Parses the model's JSON text and renders the full report.
pub fn render_analysis(json_text: &str) -> Result<RenderedDocument, ResponseFormatError> {
    let result = parse_analysis(json_text)?;
    Ok(render_analysis_result(&result))
}

/// Parses the model's JSON text into a typed, defaulted [`AnalysisResult`].
pub fn parse_analysis(json_text: &str) -> Result<AnalysisResult, ResponseFormatError> {
    let value = parse_object(json_text)?;
    Ok(serde_json::from_value(value)?)
}

pub fn render_analysis_result(result: &AnalysisResult) -> RenderedDocument {
    RenderedDocument::from(AnalysisReport(result).to_string())
}

struct AnalysisReport<'a>(&'a AnalysisResult);

impl fmt::Display for AnalysisReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0;
        f.write_str("# Resume Analysis Report\n---\n")?;
        writeln!(
            f,
            "## Overall Match Score: {}%\n---",
            score_or_na(data.match_score)
        )?;

        if let Some(kw) = &data.keyword_analysis {
            write!(
                f,
                "### Keyword Analysis\n**Coverage:** {}%\n\n",
                score_or_na(kw.coverage_percentage)
            )?;
            let (found, missing) = kw.partition();
            write_keyword_list(f, "#### ✅ Matched Keywords", &found)?;
            write_keyword_list(f, "#### ❌ Missing Keywords", &missing)?;
            f.write_str("---\n")?;
        }

        if let Some(suggestions) = &data.overall_suggestions {
            writeln!(f, "### Overall Suggestions\n{suggestions}\n---")?;
        }

        if !data.experience_analysis.is_empty() {
            f.write_str("### Experience Analysis\n")?;
            for exp in &data.experience_analysis {
                write_experience(f, exp)?;
            }
            f.write_str("---\n")?;
        }

        if !data.project_analysis.is_empty() {
            f.write_str("### Project Analysis\n")?;
            for proj in &data.project_analysis {
                write_project(f, proj)?;
            }
            f.write_str("---\n")?;
        }

        Ok(())
    }
}

fn write_keyword_list(f: &mut fmt::Formatter<'_>, heading: &str, keywords: &[&str]) -> fmt::Result {
    if keywords.is_empty() {
        return Ok(());
    }
    writeln!(f, "{heading}")?;
    for keyword in keywords {
        writeln!(f, "- {keyword}")?;
    }
    f.write_str("\n")
}

fn write_experience(f: &mut fmt::Formatter<'_>, exp: &ExperienceAnalysis) -> fmt::Result {
    writeln!(
        f,
        "\n#### {}",
        exp.title.as_deref().unwrap_or(UNTITLED_EXPERIENCE)
    )?;
    writeln!(f, "- **Relevance:** {}/10", score_or_na(exp.relevance_score))?;
    writeln!(f, "- **Depth/Ownership:** {}/10", score_or_na(exp.depth_score))?;
    write_suggestions(f, &exp.suggestions)
}

fn write_project(f: &mut fmt::Formatter<'_>, proj: &ProjectAnalysis) -> fmt::Result {
    writeln!(
        f,
        "\n#### {}",
        proj.title.as_deref().unwrap_or(UNTITLED_PROJECT)
    )?;
    writeln!(f, "- **Relevance:** {}/10", score_or_na(proj.relevance_score))?;
    writeln!(f, "- **Complexity:** {}/8", score_or_na(proj.complexity_score))?;
    write_suggestions(f, &proj.suggestions)
}

fn write_suggestions(f: &mut fmt::Formatter<'_>, suggestions: &[String]) -> fmt::Result {
    if suggestions.is_empty() {
        return Ok(());
    }
    f.write_str("- **Suggestions:**\n")?;
    for suggestion in suggestions.iter().take(MAX_SUGGESTIONS) {
        writeln!(f, "  - {suggestion}")?;
    }
    Ok(())
}

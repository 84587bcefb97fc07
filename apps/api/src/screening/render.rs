//! Markdown rendering of generated screening questions.

use std::fmt;

use serde_json::Value;

use crate::render::{is_truthy, RenderedDocument, ResponseFormatError, NOT_AVAILABLE};
use crate::screening::models::{Mcq, McqSet};

const NO_QUESTION_TEXT: &str = "No question text.";

/// Parses the model's JSON text and renders the question list.
/// Returns an empty document when there are no questions.
pub fn render_mcqs(json_text: &str) -> Result<RenderedDocument, ResponseFormatError> {
    Ok(parse_mcqs(json_text)?
        .map(|set| render_mcq_set(&set))
        .unwrap_or_else(RenderedDocument::empty))
}

/// `Ok(None)` when the JSON is valid but holds no questions: a falsy value,
/// no `mcqs` key, or an empty list.
pub fn parse_mcqs(json_text: &str) -> Result<Option<McqSet>, ResponseFormatError> {
    let value: Value = serde_json::from_str(json_text)?;
    if !is_truthy(&value) || value.get("mcqs").is_none() {
        return Ok(None);
    }
    let set: McqSet = serde_json::from_value(value)?;
    Ok((!set.mcqs.is_empty()).then_some(set))
}

pub fn render_mcq_set(set: &McqSet) -> RenderedDocument {
    if set.mcqs.is_empty() {
        return RenderedDocument::empty();
    }
    RenderedDocument::from(McqReport(set).to_string())
}

struct McqReport<'a>(&'a McqSet);

impl fmt::Display for McqReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<h1>📝 Generated Screening Questions</h1>\n---\n")?;
        for (i, mcq) in self.0.mcqs.iter().enumerate() {
            write_mcq(f, i + 1, mcq)?;
        }
        Ok(())
    }
}

fn write_mcq(f: &mut fmt::Formatter<'_>, number: usize, mcq: &Mcq) -> fmt::Result {
    write!(
        f,
        "**{number}. {}**\n\n",
        mcq.question.as_deref().unwrap_or(NO_QUESTION_TEXT)
    )?;
    for option in &mcq.options {
        writeln!(f, "- {option}")?;
    }
    writeln!(
        f,
        "\n**✅ Correct Answer:** {}\n---",
        mcq.correct_answer.as_deref().unwrap_or(NOT_AVAILABLE)
    )
}

// LLM prompt template for screening question generation.

use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};

/// Number of questions requested per job description.
pub const QUESTION_COUNT: usize = 10;

/// MCQ prompt template.
/// Replace: {question_count}, {job_description}, {json_only}
pub const MCQ_PROMPT_TEMPLATE: &str = r#"Based on the following job description, please generate {question_count} multiple-choice questions (MCQs) to screen a candidate.

The questions should be a mix of two types:
1. Direct technical questions about the specific languages, frameworks, and tools mentioned (e.g., "What is a hook in React?").
2. Scenario-based or practical questions that test how a candidate would apply those technologies to solve a common, real-world problem (e.g., "A user reports that a web page is loading slowly. Which AWS service would be most effective for diagnosing the performance bottleneck?").

Provide the output strictly in a clean JSON format, without any surrounding text or markdown markers. The JSON should look exactly like this:
{
  "mcqs": [
    {
      "question": "The full question text.",
      "options": [
        "A. Option text 1",
        "B. Option text 2",
        "C. Option text 3",
        "D. Option text 4"
      ],
      "correct_answer": "The letter of the correct option (e.g., 'B')"
    }
  ]
}

Every question must have exactly 4 options.
{json_only}

Job Description:
---
{job_description}
---"#;

/// Builds the MCQ prompt. The job description appears verbatim in the output.
pub fn build_mcq_prompt(job_description: &str) -> String {
    let count = QUESTION_COUNT.to_string();
    fill_template(
        MCQ_PROMPT_TEMPLATE,
        &[
            ("question_count", count.as_str()),
            ("job_description", job_description),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

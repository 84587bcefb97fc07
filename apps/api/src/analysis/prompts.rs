// LLM prompt template for the resume analysis flow.

use crate::llm_client::prompts::{fill_template, INFER_SECTIONS_INSTRUCTION, JSON_ONLY_INSTRUCTION};

/// Analysis prompt template.
/// Replace: {resume_text}, {job_description}, {infer_sections}, {json_only}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert AI resume analyzer. Analyze the resume against the job description and return a structured JSON.

Resume:
```
{resume_text}
```

Job Description:
```
{job_description}
```

Return only a single valid JSON object with this structure:

1.  `matchScore`: Integer 0–100 (overall match percentage).
2.  `keywordAnalysis`: Object with:
    - `coveragePercentage`: Integer 0–100.
    - `neededKeywords`: Array of objects, each having (include **only concrete technical skills**, e.g., programming languages, frameworks, libraries, tools, platforms, databases, etc.; **ignore generic descriptive terms**):
        - `keyword`: String.
        - `found`: Boolean.
3.  `overallSuggestions`: String (concise, actionable advice).
4.  `experienceAnalysis`: Array of objects:
    - `title`: Role title.
    - `relevanceScore`: 0–10.
    - `depthScore`: 0–10.
    - `suggestions`: Array of 1–2 short, actionable suggestions (≤15 words each).
5.  `projectAnalysis`: Array of objects:
    - `title`: Project name.
    - `relevanceScore`: 0–10.
    - `complexityScore`: 0–8.
    - `suggestions`: Array of 1–2 short, actionable suggestions (≤15 words each).

**Important:**
- Only list concrete, verifiable skills.
{infer_sections}
{json_only}"#;

/// Builds the analysis prompt. Both inputs appear verbatim in the output.
pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("resume_text", resume_text),
            ("job_description", job_description),
            ("infer_sections", INFER_SECTIONS_INSTRUCTION),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\nBackend Intern at Acme\nBuilt Python services";
    const JD: &str = "Backend Engineer\nRequired: Python, Go, PostgreSQL";

    #[test]
    fn test_prompt_embeds_both_inputs_verbatim() {
        let prompt = build_analysis_prompt(RESUME, JD);
        assert!(prompt.contains(RESUME));
        assert!(prompt.contains(JD));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_analysis_prompt(RESUME, JD), build_analysis_prompt(RESUME, JD));
    }

    #[test]
    fn test_prompt_leaves_no_placeholders() {
        let prompt = build_analysis_prompt(RESUME, JD);
        for key in ["{resume_text}", "{job_description}", "{infer_sections}", "{json_only}"] {
            assert!(!prompt.contains(key), "placeholder {key} left in prompt");
        }
    }

    #[test]
    fn test_prompt_states_schema_and_constraints() {
        let prompt = build_analysis_prompt(RESUME, JD);
        assert!(prompt.contains("`matchScore`"));
        assert!(prompt.contains("`complexityScore`: 0–8"));
        assert!(prompt.contains("1–2 short"));
        assert!(prompt.contains("code fences"));
        assert!(prompt.contains("infer experience and projects from context"));
    }

    #[test]
    fn test_placeholder_text_inside_resume_is_kept_verbatim() {
        let resume = "I once wrote {job_description} in a template";
        let prompt = build_analysis_prompt(resume, JD);
        assert!(prompt.contains(resume));
    }

    #[test]
    fn test_empty_inputs_do_not_panic() {
        let prompt = build_analysis_prompt("", "");
        assert!(prompt.contains("Resume:"));
    }
}

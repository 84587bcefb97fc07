// Resume analysis flow: PDF text + job description -> model -> Markdown report.
// All model calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod render;

// Screening question flow: job description -> model -> numbered MCQ document.
// All model calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod render;

use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::llm_client::CompletionClient;
use crate::session::JobDescriptionCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model client. Default: GeminiClient. Tests swap in a canned fake.
    pub llm: Arc<dyn CompletionClient>,
    /// Resume text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    pub sessions: Arc<JobDescriptionCache>,
    pub config: Config,
}

//! Fakes for the model client and the text extractor, shared by handler and router tests.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::extraction::{ExtractError, TextExtractor};
use crate::llm_client::{CompletionClient, LlmError};

/// Returns a fixed completion and remembers the last prompt it saw.
pub struct CannedCompletion {
    pub response: Result<String, u16>,
    pub last_prompt: Mutex<Option<String>>,
}

impl CannedCompletion {
    pub fn ok(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            response: Err(status),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for CannedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(LlmError::Api {
                status: *status,
                message: "canned failure".to_string(),
            }),
        }
    }
}

/// Ignores the file and returns fixed text.
pub struct CannedExtractor(pub Option<&'static str>);

#[async_trait]
impl TextExtractor for CannedExtractor {
    async fn extract(&self, _path: &Path) -> Result<String, ExtractError> {
        self.0.map(str::to_string).ok_or(ExtractError::NoText)
    }
}

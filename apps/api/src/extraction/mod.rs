//! Text extraction from uploaded resumes.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; the default is `PdfTextExtractor`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Every PDF file starts with this header.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Shown to the caller when the PDF cannot be parsed. Parser details stay in the logs.
pub const UNREADABLE_PDF_MESSAGE: &str = "Could not read text from the uploaded PDF.";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read text from the PDF: {0}")]
    Pdf(String),

    #[error("The PDF does not contain any extractable text")]
    NoText,
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the normalized plain text of the document at `path`.
    async fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Extracts text with `pdf-extract`. Parsing runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let path: PathBuf = path.to_path_buf();
        let raw = tokio::task::spawn_blocking(move || -> Result<String, ExtractError> {
            let bytes = std::fs::read(&path)?;
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
                ExtractError::Pdf(format!("'{}': {e}", path.display()))
            })
        })
        .await
        .map_err(|e| ExtractError::Pdf(format!("extraction task failed: {e}")))??;

        let text = normalize_text(&raw);
        if text.is_empty() {
            return Err(ExtractError::NoText);
        }
        Ok(text)
    }
}

/// Trims every line and drops blank ones, joining what remains with `\n`.
/// Page breaks (form feeds) count as whitespace.
pub fn normalize_text(raw: &str) -> String {
    raw.replace(['\u{0}', '\u{FEFF}'], "")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Accepts a file only if its name ends in `.pdf` and its bytes carry the PDF header.
pub fn is_pdf(file_name: &str, bytes: &[u8]) -> bool {
    file_name.to_lowercase().ends_with(".pdf") && bytes.starts_with(PDF_MAGIC)
}

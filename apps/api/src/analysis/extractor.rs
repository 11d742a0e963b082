//! Pulls plain text out of an uploaded PDF, page by page.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// PDF could not be opened or parsed. Carries the underlying cause.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Error parsing PDF: {cause}")]
pub struct ExtractionError {
    pub cause: String,
}

impl ExtractionError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}

/// Carried in `AppState` as `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// `pdf-extract` backed extractor. Parsing runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || extract_pdf_text(&path))
            .await
            // pdf-extract panics on some malformed inputs
            .map_err(|e| ExtractionError::new(format!("PDF parser aborted: {e}")))?
    }
}

/// Concatenates the text of every page in page order. Pages without
/// extractable text contribute nothing.
pub fn extract_pdf_text(path: &Path) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| ExtractionError::new(e.to_string()))?;
    debug!("Extracted {} page(s) from {}", pages.len(), path.display());
    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages.concat()
}

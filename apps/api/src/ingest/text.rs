use std::panic::catch_unwind;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type. Please upload .txt or .pdf")]
    UnsupportedType,

    #[error("Could not extract text from PDF")]
    UnreadablePdf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Detects the document kind from the upload's file extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if lower.ends_with(".txt") {
            Some(DocumentKind::PlainText)
        } else {
            None
        }
    }
}

/// Turns uploaded bytes into plain text. Synchronous and CPU-bound; call it from
/// `spawn_blocking`.
pub trait TextExtractionService: Send + Sync {
    fn extract(&self, filename: &str, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Handles `.pdf` via `pdf-extract` and `.txt` as UTF-8, dropping undecodable bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentTextExtractor;

impl TextExtractionService for DocumentTextExtractor {
    fn extract(&self, filename: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
        let kind = DocumentKind::from_filename(filename).ok_or(ExtractionError::UnsupportedType)?;
        let text = match kind {
            DocumentKind::Pdf => pdf_text(filename, bytes)?,
            DocumentKind::PlainText => decode_text(bytes),
        };
        debug!("Extracted {} chars from {filename}", text.len());
        Ok(text)
    }
}

fn pdf_text(filename: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed documents
    let text = match catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Failed to parse PDF {filename}: {e}");
            return Err(ExtractionError::UnreadablePdf);
        }
        Err(_) => {
            warn!("PDF parser panicked on {filename}");
            return Err(ExtractionError::UnreadablePdf);
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionError::UnreadablePdf);
    }
    Ok(text.to_string())
}

/// Decodes UTF-8, skipping invalid byte sequences.
fn decode_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text.trim().to_string()
}

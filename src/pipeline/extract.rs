//! Text extraction: document bytes → best-effort plain text.
//!
//! PDFs (detected by the `%PDF` magic bytes) go through `pdf-extract`.
//! Anything else is accepted when it is valid UTF-8, so plain `.txt`
//! chapters work through the same entry point. Empty output is an error:
//! a scanned PDF without a text layer gives the user nothing to summarise,
//! and the expected recovery is pasting the text manually.

use crate::error::NotesError;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Converts document bytes into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, NotesError>;
}

/// Extractor for PDF and UTF-8 text documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, NotesError> {
        let text = if is_pdf(bytes) {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| NotesError::ExtractionFailed {
                reason: format!("unparseable PDF: {e}"),
            })?
        } else {
            std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| NotesError::ExtractionFailed {
                    reason: format!(
                        "document is neither a PDF nor UTF-8 text (first bytes: {:?})",
                        &bytes[..bytes.len().min(4)]
                    ),
                })?
        };

        if text.trim().is_empty() {
            warn!("Document has no extractable text ({} bytes)", bytes.len());
            return Err(NotesError::ExtractionFailed {
                reason: "no extractable text (scanned PDF?)".into(),
            });
        }

        debug!("Extracted {} chars from {} bytes", text.len(), bytes.len());
        Ok(text)
    }
}

/// Whether `bytes` start with the PDF magic number.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Extract text with the default [`PdfTextExtractor`].
pub fn extract_text(bytes: &[u8]) -> Result<String, NotesError> {
    PdfTextExtractor.extract(bytes)
}

/// Run an extractor on the blocking pool.
///
/// PDF parsing is CPU-bound and `pdf-extract` can panic on malformed input;
/// a panicked task is reported as [`NotesError::ExtractionFailed`].
pub async fn extract_text_blocking<E>(extractor: E, bytes: Vec<u8>) -> Result<String, NotesError>
where
    E: TextExtractor + 'static,
{
    tokio::task::spawn_blocking(move || extractor.extract(&bytes))
        .await
        .map_err(|e| NotesError::ExtractionFailed {
            reason: format!("extraction task failed: {e}"),
        })?
}

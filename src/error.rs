//! Error types for the diamond-notes library.
//!
//! The notes pipeline itself is total over every string input and never
//! fails. Errors only exist at the boundary with collaborators:
//!
//! * **Request errors**: required fields were missing before the pipeline
//!   could run ([`NotesError::InvalidRequest`]).
//! * **Source errors**: the chapter document could not be retrieved
//!   ([`NotesError::SourceUnavailable`], [`NotesError::DownloadTimeout`]).
//! * **Extraction errors**: bytes were retrieved but no text came out of
//!   them ([`NotesError::ExtractionFailed`]). The expected recovery is manual
//!   text entry by the user.
//! * **Generation errors**: the optional language-model path failed.
//!
//! Nothing in this crate retries source or extraction failures; callers use
//! [`NotesError::is_retryable`] to decide.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the diamond-notes library.
#[derive(Debug, Error)]
pub enum NotesError {
    // ── Request errors ────────────────────────────────────────────────────
    /// A required request field was missing or blank.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // ── Source errors ─────────────────────────────────────────────────────
    /// The document could not be retrieved from its source.
    #[error("Document '{source_id}' is unavailable: {reason}")]
    SourceUnavailable { source_id: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// No text could be extracted from the document bytes.
    #[error("Text extraction failed: {reason}\nPaste the chapter text manually instead.")]
    ExtractionFailed { reason: String },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The LLM API returned an error after all retries.
    #[error("LLM API error: {message}")]
    LlmApiError { message: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the rendered notes file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl NotesError {
    /// Whether repeating the same call could plausibly succeed.
    ///
    /// Network and provider failures are transient; a bad request, an
    /// unparseable document or a broken configuration will fail the same way
    /// every time.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NotesError::SourceUnavailable { .. }
                | NotesError::DownloadTimeout { .. }
                | NotesError::LlmApiError { .. }
        )
    }
}

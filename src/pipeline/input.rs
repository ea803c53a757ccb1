//! Document sources: turn a user-supplied identifier into document bytes.
//!
//! An identifier is one of
//!
//! - an HTTP(S) URL, downloaded as-is;
//! - a path to an existing local file;
//! - a bare file name such as `lehi1.pdf`, joined with the configured base
//!   URL (the NCERT textbook host by default).
//!
//! Every failure maps to [`NotesError::SourceUnavailable`] (or
//! [`NotesError::DownloadTimeout`]). Nothing here retries.

use crate::config::NotesConfig;
use crate::error::NotesError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Something that can produce the raw bytes of a chapter document.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the document named by `id`.
    async fn fetch(&self, id: &str) -> Result<Vec<u8>, NotesError>;
}

/// Where an identifier points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Absolute HTTP(S) URL.
    Url(String),
    /// Local file path.
    Local(PathBuf),
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Join a base URL and a file name with exactly one slash.
pub fn document_url(base_url: &str, file: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        file.trim_start_matches('/')
    )
}

/// Decide where `input` points.
///
/// Existing local files win over bare names, so `lehi1.pdf` in the working
/// directory is read from disk rather than downloaded.
pub fn resolve_location(input: &str, base_url: &str) -> SourceLocation {
    if is_url(input) {
        return SourceLocation::Url(input.to_string());
    }
    let path = Path::new(input);
    if path.exists() || input.contains('/') || input.contains('\\') {
        return SourceLocation::Local(path.to_path_buf());
    }
    SourceLocation::Url(document_url(base_url, input))
}

/// Default source: URLs over HTTP, paths from disk, bare names from the base URL.
#[derive(Debug, Clone)]
pub struct DefaultDocumentSource {
    base_url: String,
    timeout_secs: u64,
}

impl DefaultDocumentSource {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs,
        }
    }

    pub fn from_config(config: &NotesConfig) -> Self {
        Self::new(config.source_base_url.clone(), config.download_timeout_secs)
    }
}

#[async_trait]
impl DocumentSource for DefaultDocumentSource {
    async fn fetch(&self, id: &str) -> Result<Vec<u8>, NotesError> {
        match resolve_location(id, &self.base_url) {
            SourceLocation::Url(url) => download_url(&url, self.timeout_secs).await,
            SourceLocation::Local(path) => read_local(&path).await,
        }
    }
}

async fn read_local(path: &Path) -> Result<Vec<u8>, NotesError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| NotesError::SourceUnavailable {
            source_id: path.display().to_string(),
            reason: e.to_string(),
        })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

async fn download_url(url: &str, timeout_secs: u64) -> Result<Vec<u8>, NotesError> {
    info!("Downloading document from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| NotesError::Internal(format!("HTTP client: {e}")))?;

    let unavailable = |reason: String| NotesError::SourceUnavailable {
        source_id: url.to_string(),
        reason,
    };

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            NotesError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            unavailable(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        return Err(unavailable(format!("HTTP {}", response.status())));
    }

    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            NotesError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            unavailable(e.to_string())
        }
    })?;

    info!("Downloaded {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

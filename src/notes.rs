//! Entry points: synthesize notes from text, from a document source, or via
//! a language model.
//!
//! [`synthesize_notes`] is the core operation. It is synchronous, pure and
//! total: every string in, a [`NotesResult`] with at least one section out.
//! The async functions wrap it with the collaborators (document source and
//! text extraction) and surface their failures as [`NotesError`].

use crate::config::NotesConfig;
use crate::error::NotesError;
use crate::output::{NotesResult, NotesSection};
use crate::pipeline::extract::{extract_text_blocking, PdfTextExtractor, TextExtractor};
use crate::pipeline::input::{DefaultDocumentSource, DocumentSource};
use crate::pipeline::llm::TextGenerator;
use crate::pipeline::{bullets, conclusion, keywords, lines, postprocess, sections};
use crate::prompts::{build_prompt, PromptContext};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Synthesize structured notes from raw chapter text with default limits.
///
/// # Example
/// ```rust
/// use diamond_notes::synthesize_notes;
///
/// let notes = synthesize_notes("Forces", "Objects fall. They speed up.");
/// assert_eq!(notes.sections[0].heading, "Introduction");
/// assert_eq!(notes.conclusion, "Objects fall. They speed up.");
/// ```
pub fn synthesize_notes(title: &str, chapter_text: &str) -> NotesResult {
    synthesize_notes_with(title, chapter_text, &NotesConfig::default())
}

/// Synthesize structured notes using the limits in `config`.
pub fn synthesize_notes_with(title: &str, chapter_text: &str, config: &NotesConfig) -> NotesResult {
    let start = Instant::now();
    let doc_lines = lines::segment_lines(chapter_text);

    let notes_sections: Vec<NotesSection> = sections::build_sections(&doc_lines, title, config)
        .into_iter()
        .map(|section| NotesSection {
            bullets: bullets::bulletize(&section.content_lines, config),
            heading: section.heading,
        })
        .collect();

    let conclusion = conclusion::extract_conclusion(&doc_lines, config);
    let keywords = keywords::extract_keywords(&lines::join_lines(&doc_lines), config.max_keywords)
        .into_iter()
        .map(|k| k.term)
        .collect();

    let notes = NotesResult {
        title: title.to_string(),
        sections: notes_sections,
        conclusion,
        keywords,
    };

    debug!(
        "Synthesized {} sections, {} bullets, {} keywords from {} lines in {:?}",
        notes.sections.len(),
        notes.bullet_count(),
        notes.keywords.len(),
        doc_lines.len(),
        start.elapsed()
    );
    notes
}

/// A request for notes as received from a form or API body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesRequest {
    #[serde(rename = "chapterTitle", default)]
    pub title: String,
    #[serde(default)]
    pub chapter_text: String,
}

impl NotesRequest {
    pub fn new(title: impl Into<String>, chapter_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            chapter_text: chapter_text.into(),
        }
    }

    /// Reject requests with a blank title or blank chapter text.
    pub fn validate(&self) -> Result<(), NotesError> {
        if self.title.trim().is_empty() || self.chapter_text.trim().is_empty() {
            return Err(NotesError::InvalidRequest(
                "Both chapterTitle and chapterText are required".into(),
            ));
        }
        Ok(())
    }
}

/// Validate `request`, then synthesize notes.
pub fn generate_notes(request: &NotesRequest, config: &NotesConfig) -> Result<NotesResult, NotesError> {
    request.validate()?;
    info!("Generating notes for '{}'", request.title);
    Ok(synthesize_notes_with(&request.title, &request.chapter_text, config))
}

/// Fetch raw document bytes for `input` (URL, local path or NCERT file name).
pub async fn fetch_document(input: &str, config: &NotesConfig) -> Result<Vec<u8>, NotesError> {
    DefaultDocumentSource::from_config(config).fetch(input).await
}

/// Fetch a document and extract its plain text with [`PdfTextExtractor`].
pub async fn fetch_chapter_text(input: &str, config: &NotesConfig) -> Result<String, NotesError> {
    let bytes = fetch_document(input, config).await?;
    extract_text_blocking(PdfTextExtractor, bytes).await
}

/// Fetch a document, extract its text and synthesize notes.
pub async fn notes_from_source(
    input: &str,
    title: &str,
    config: &NotesConfig,
) -> Result<NotesResult, NotesError> {
    let source = DefaultDocumentSource::from_config(config);
    notes_from_source_with(&source, PdfTextExtractor, input, title, config).await
}

/// Like [`notes_from_source`] with a caller-supplied [`DocumentSource`] and
/// [`TextExtractor`].
pub async fn notes_from_source_with<E>(
    source: &dyn DocumentSource,
    extractor: E,
    input: &str,
    title: &str,
    config: &NotesConfig,
) -> Result<NotesResult, NotesError>
where
    E: TextExtractor + 'static,
{
    if title.trim().is_empty() {
        return Err(NotesError::InvalidRequest("chapterTitle is required".into()));
    }
    info!("Starting notes from source: {}", input);

    let bytes = source.fetch(input).await?;
    let text = extract_text_blocking(extractor, bytes).await?;
    Ok(synthesize_notes_with(title, &text, config))
}

/// Ask a language model for notes instead of synthesizing them.
///
/// The reply is cleaned with [`postprocess::clean_generated_text`]. Blank
/// chapter text is rejected before any request is made.
pub async fn generate_with_llm(
    generator: &dyn TextGenerator,
    ctx: &PromptContext,
    chapter_text: &str,
) -> Result<String, NotesError> {
    if chapter_text.trim().is_empty() {
        return Err(NotesError::InvalidRequest("chapterText is required".into()));
    }
    let prompt = build_prompt(ctx, chapter_text);
    debug!("Prompt is {} chars", prompt.len());
    let raw = generator.generate(&prompt).await?;
    Ok(postprocess::clean_generated_text(&raw))
}

/// Write rendered notes to `path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn write_notes_to_file(
    contents: &str,
    output_path: impl AsRef<Path>,
) -> Result<(), NotesError> {
    let path = output_path.as_ref();
    let write_failed = |source: std::io::Error| NotesError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = std::path::PathBuf::from(tmp_name);

    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(write_failed)?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(write_failed)?;

    info!("Wrote notes to {}", path.display());
    Ok(())
}

//! Fixed strings: rendered-notes boilerplate and the generative prompt.
//!
//! Everything here is a process-wide constant or a pure function of its
//! arguments. Tests import these directly so wording changes show up as
//! test diffs instead of silent output drift.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Rendered notes ───────────────────────────────────────────────────────

/// Prefix of the first rendered line.
pub const TITLE_LABEL: &str = "Chapter Title:";

/// Fixed line printed under the title of every rendered note set.
pub const NOTES_INTRO: &str =
    "Diamond Notes: key points from the chapter, in textbook order.";

/// Prefix of every rendered bullet.
pub const BULLET_MARKER: &str = "- ";

/// Label above the conclusion block.
pub const CONCLUSION_LABEL: &str = "Conclusion:";

/// Label above the comma-joined keyword line.
pub const KEYWORDS_LABEL: &str = "Keywords to Remember:";

// ── Generative prompt ────────────────────────────────────────────────────

/// System message sent with every generation request.
pub const GENERATOR_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Shown instead of a chapter name when the text came from an uploaded file.
pub const UPLOADED_CHAPTER_LABEL: &str = "(uploaded PDF)";

/// Language the generated notes should be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputLanguage {
    #[default]
    English,
    Hindi,
}

impl fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLanguage::English => f.write_str("English"),
            OutputLanguage::Hindi => f.write_str("Hindi"),
        }
    }
}

/// What the student selected before asking for notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptContext {
    pub class_level: u8,
    pub subject: String,
    /// Chapter name typed by the user, if any.
    pub chapter_name: Option<String>,
    pub language: OutputLanguage,
}

impl PromptContext {
    pub fn new(class_level: u8, subject: impl Into<String>) -> Self {
        Self {
            class_level,
            subject: subject.into(),
            chapter_name: None,
            language: OutputLanguage::default(),
        }
    }

    pub fn with_chapter_name(mut self, name: impl Into<String>) -> Self {
        self.chapter_name = Some(name.into());
        self
    }

    pub fn with_language(mut self, language: OutputLanguage) -> Self {
        self.language = language;
        self
    }

    fn chapter_label(&self) -> &str {
        match self.chapter_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => UPLOADED_CHAPTER_LABEL,
        }
    }
}

/// Compose the master prompt for the generative path.
///
/// The chapter text is embedded verbatim between the
/// `NCERT CHAPTER TEXT START:` / `NCERT CHAPTER TEXT END.` markers.
pub fn build_prompt(ctx: &PromptContext, chapter_text: &str) -> String {
    format!(
        "You are an expert NCERT educational assistant that generates \"Diamond Notes\": \
detailed, structured study notes for students in Classes 1 to 12.\n\n\
The user selected: Class {class}, Subject: {subject}, Chapter: {chapter}, Output Language: {language}.\n\n\
Task: Using ONLY the provided NCERT chapter text (below), generate Diamond Notes in the selected \
language following this format:\n\
1) Chapter Title\n\
2) Numbered Headings (in NCERT order) with concise bullet points under each heading \
(include important dates, facts, definitions, examples, diagram descriptions).\n\
3) Conclusion (2-3 lines)\n\
4) Keywords to Remember (8-15 items).\n\n\
Strict rules: Use only the content below; do not add outside knowledge. Keep bullets concise, \
exam-oriented, and preserve NCERT sequence. Output must be clear and well-structured.\n\n\
NCERT CHAPTER TEXT START:\n\n{text}\n\nNCERT CHAPTER TEXT END.",
        class = ctx.class_level,
        subject = ctx.subject,
        chapter = ctx.chapter_label(),
        language = ctx.language,
        text = chapter_text,
    )
}

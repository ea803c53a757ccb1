//! Result types produced by the notes pipeline.

use serde::{Deserialize, Serialize};

/// One headed block of the notes: a heading and its bullet points.
///
/// Invariants: at most `max_bullets` bullets (12 by default), each at most
/// `max_bullet_chars` characters (200 by default) with internal whitespace
/// collapsed to single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesSection {
    pub heading: String,
    pub bullets: Vec<String>,
}

/// A keyword candidate and the number of times it occurs in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    /// Case-sensitive term with parentheses stripped.
    pub term: String,
    /// Occurrences across the whole document, always ≥ 1.
    pub frequency: usize,
}

/// Structured notes for one chapter.
///
/// Created once per call; never mutated afterwards by this crate. Use
/// [`NotesResult::render`] for the flat text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesResult {
    pub title: String,
    /// Sections in order of first appearance in the document. Never empty.
    pub sections: Vec<NotesSection>,
    pub conclusion: String,
    /// Distinct terms by descending frequency, ties in first-seen order.
    pub keywords: Vec<String>,
}

impl NotesResult {
    /// Render the notes as plain text.
    ///
    /// See [`crate::pipeline::render::render_notes`] for the layout.
    pub fn render(&self) -> String {
        crate::pipeline::render::render_notes(self)
    }

    /// Total bullets across all sections.
    pub fn bullet_count(&self) -> usize {
        self.sections.iter().map(|s| s.bullets.len()).sum()
    }
}

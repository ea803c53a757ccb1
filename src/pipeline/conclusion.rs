//! Conclusion extraction.

use crate::config::NotesConfig;
use crate::pipeline::lines::join_lines;
use crate::pipeline::sentences::split_sentences;

/// Join the first `conclusion_sentences` sentences of the whole document.
///
/// Headings take part like any other line. Fewer sentences than requested
/// uses what exists; none yields an empty string.
pub fn extract_conclusion(lines: &[&str], config: &NotesConfig) -> String {
    let text = join_lines(lines);
    split_sentences(&text)
        .into_iter()
        .take(config.conclusion_sentences)
        .collect::<Vec<_>>()
        .join(" ")
}

//! Bulletization: turn a section's content into a short bullet list.

use crate::config::NotesConfig;
use crate::pipeline::lines::join_lines;
use crate::pipeline::sentences::split_sentences;
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker appended to truncated bullets.
pub const ELLIPSIS: &str = "...";

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Build the bullet list for one section's content lines.
///
/// Lines are joined with spaces and split into sentences; the first
/// `max_bullets` sentences become bullets after whitespace collapsing and
/// truncation to `max_bullet_chars`. Empty content yields no bullets.
pub fn bulletize(content_lines: &[&str], config: &NotesConfig) -> Vec<String> {
    let block = join_lines(content_lines);
    split_sentences(&block)
        .into_iter()
        .take(config.max_bullets)
        .map(|sentence| truncate_bullet(&collapse_whitespace(sentence), config.max_bullet_chars))
        .collect()
}

/// Collapse every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").into_owned()
}

/// Cap `text` at `max_chars` characters.
///
/// Longer text keeps its first `max_chars - 3` characters and gains
/// [`ELLIPSIS`], so the result is exactly `max_chars` long.
pub fn truncate_bullet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut bullet: String = text.chars().take(keep).collect();
    bullet.push_str(ELLIPSIS);
    bullet
}

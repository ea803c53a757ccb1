//! Line segmentation.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Split a document into trimmed, non-empty lines in original order.
///
/// Any newline sequence (`\r\n`, `\r`, `\n`) is a boundary. An empty or
/// all-blank document yields an empty vector.
pub fn segment_lines(document: &str) -> Vec<&str> {
    RE_NEWLINE
        .split(document)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Join lines into one block separated by single spaces.
pub fn join_lines(lines: &[&str]) -> String {
    lines.join(" ")
}

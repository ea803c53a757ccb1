//! Heading classification.
//!
//! A line is a heading when it is either
//!
//! - **numbered**: dot-separated integers, whitespace, then text
//!   (`2.1 Forces and Motion`), normalised to `"<number> <text>"`; or
//! - **shouted**: at most 80 characters, unchanged by upper-casing and
//!   containing at least one ASCII letter (`THE FRENCH REVOLUTION`), kept
//!   verbatim.
//!
//! Classification looks at one line only. Scripts without case (Devanagari
//! etc.) never satisfy the letter requirement and are always content.

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest line, in characters, that can be an all-caps heading.
pub const MAX_CAPS_HEADING_CHARS: usize = 80;

static RE_NUMBERED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)*)\s+(.+)$").unwrap());

/// Classification of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingCandidate {
    pub is_heading: bool,
    pub normalized_heading: Option<String>,
}

impl HeadingCandidate {
    fn heading(text: impl Into<String>) -> Self {
        Self {
            is_heading: true,
            normalized_heading: Some(text.into()),
        }
    }

    fn content() -> Self {
        Self {
            is_heading: false,
            normalized_heading: None,
        }
    }
}

/// Classify a trimmed line.
pub fn classify_line(line: &str) -> HeadingCandidate {
    if let Some(caps) = RE_NUMBERED.captures(line) {
        return HeadingCandidate::heading(format!("{} {}", &caps[1], &caps[2]));
    }
    if is_caps_heading(line) {
        return HeadingCandidate::heading(line);
    }
    HeadingCandidate::content()
}

fn is_caps_heading(line: &str) -> bool {
    line.chars().count() <= MAX_CAPS_HEADING_CHARS
        && line.to_uppercase() == line
        && line.chars().any(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading_of(line: &str) -> Option<String> {
        classify_line(line).normalized_heading
    }

    #[test]
    fn test_numbered_headings() {
        assert_eq!(heading_of("1 Introduction").as_deref(), Some("1 Introduction"));
        assert_eq!(
            heading_of("2.1 Forces and Motion").as_deref(),
            Some("2.1 Forces and Motion")
        );
        assert_eq!(heading_of("3.2.4\tTables").as_deref(), Some("3.2.4 Tables"));
    }

    #[test]
    fn test_number_spacing_is_normalised() {
        assert_eq!(heading_of("4    Summary").as_deref(), Some("4 Summary"));
    }

    #[test]
    fn test_number_without_text_is_not_numbered() {
        // "12" alone: no space + text, and no letters for the caps rule.
        assert!(!classify_line("12").is_heading);
        assert!(!classify_line("2.1.").is_heading);
    }

    #[test]
    fn test_caps_headings() {
        assert_eq!(
            heading_of("THE FRENCH REVOLUTION").as_deref(),
            Some("THE FRENCH REVOLUTION")
        );
        assert!(classify_line("WHAT IS DEMOCRACY?").is_heading);
    }

    #[test]
    fn test_caps_too_long_is_content() {
        let long = "A".repeat(MAX_CAPS_HEADING_CHARS + 1);
        assert!(!classify_line(&long).is_heading);
        let edge = "B".repeat(MAX_CAPS_HEADING_CHARS);
        assert!(classify_line(&edge).is_heading);
    }

    #[test]
    fn test_mixed_case_is_content() {
        let c = classify_line("The French Revolution began in 1789.");
        assert!(!c.is_heading);
        assert_eq!(c.normalized_heading, None);
    }

    #[test]
    fn test_no_letters_is_content() {
        assert!(!classify_line("— 42 —").is_heading);
        assert!(!classify_line("भारत का इतिहास").is_heading);
    }
}

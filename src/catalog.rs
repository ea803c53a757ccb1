//! NCERT subjects offered per class.
//!
//! Classes 11 and 12 are split into arts, commerce and science streams; when
//! no stream is chosen the union is offered, deduplicated in first-seen order.

use crate::error::NotesError;

const PRIMARY: &[&str] = &[
    "Mathematics",
    "English",
    "Hindi",
    "Bengali",
    "Science",
    "Social Science",
];

const SECONDARY: &[&str] = &[
    "Mathematics",
    "English",
    "Hindi",
    "Bengali",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Geography",
    "Political Science",
    "Economics",
];

const SENIOR_ARTS: &[&str] = &[
    "History",
    "Geography",
    "Political Science",
    "Economics",
    "Sociology",
    "Philosophy",
    "Psychology",
    "Social Science",
    "English",
    "Hindi",
];

const SENIOR_COMMERCE: &[&str] = &[
    "Economics",
    "Business Studies",
    "Accountancy",
    "Mathematics",
    "English",
    "Hindi",
];

const SENIOR_SCIENCE: &[&str] = &[
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "English",
    "Hindi",
];

/// Subjects available for `class_level` (1–12).
pub fn subjects_for_class(class_level: u8) -> Result<Vec<&'static str>, NotesError> {
    match class_level {
        1..=8 => Ok(PRIMARY.to_vec()),
        9..=10 => Ok(SECONDARY.to_vec()),
        11..=12 => {
            let mut subjects: Vec<&'static str> = Vec::new();
            for &s in SENIOR_ARTS.iter().chain(SENIOR_COMMERCE).chain(SENIOR_SCIENCE) {
                if !subjects.contains(&s) {
                    subjects.push(s);
                }
            }
            Ok(subjects)
        }
        other => Err(NotesError::InvalidRequest(format!(
            "Class must be between 1 and 12, got {other}"
        ))),
    }
}

/// Whether `subject` is offered for `class_level` (case-insensitive).
pub fn is_known_subject(class_level: u8, subject: &str) -> bool {
    subjects_for_class(class_level)
        .map(|list| list.iter().any(|s| s.eq_ignore_ascii_case(subject.trim())))
        .unwrap_or(false)
}

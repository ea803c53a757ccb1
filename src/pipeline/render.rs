//! Flat text rendering of a [`NotesResult`].
//!
//! ```text
//! Chapter Title: <title>
//!
//! Diamond Notes: key points from the chapter, in textbook order.
//!
//! <heading>
//! - <bullet>
//! - <bullet>
//!
//! Conclusion:
//! <conclusion>
//!
//! Keywords to Remember:
//! <k1>, <k2>, …
//! ```
//!
//! Sections with no bullets still print their heading. An empty conclusion
//! or keyword list leaves only the label. Output ends with one newline.

use crate::output::NotesResult;
use crate::prompts::{BULLET_MARKER, CONCLUSION_LABEL, KEYWORDS_LABEL, NOTES_INTRO, TITLE_LABEL};

/// Render notes as plain text.
pub fn render_notes(notes: &NotesResult) -> String {
    let mut out = String::with_capacity(256 + notes.bullet_count() * 96);

    out.push_str(&format!("{} {}\n\n", TITLE_LABEL, notes.title));
    out.push_str(NOTES_INTRO);
    out.push_str("\n\n");

    for section in &notes.sections {
        out.push_str(&section.heading);
        out.push('\n');
        for bullet in &section.bullets {
            out.push_str(BULLET_MARKER);
            out.push_str(bullet);
            out.push('\n');
        }
        out.push('\n');
    }

    push_block(&mut out, CONCLUSION_LABEL, &notes.conclusion);
    out.push('\n');
    push_block(&mut out, KEYWORDS_LABEL, &notes.keywords.join(", "));
    out
}

fn push_block(out: &mut String, label: &str, body: &str) {
    out.push_str(label);
    out.push('\n');
    if !body.is_empty() {
        out.push_str(body);
        out.push('\n');
    }
}

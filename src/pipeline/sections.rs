//! Section building: group classified lines under their headings.
//!
//! A two-state machine with a single pending accumulator:
//!
//! ```text
//!            heading                     heading
//! AccumulatingIntro ──────▶ AccumulatingSection ◀──┐
//!   │  ▲                        │  ▲               │
//!   └──┘ content                └──┘ content ──────┘
//! ```
//!
//! On every heading the pending section is closed (only if it holds content)
//! and a new one opens. Content seen before the first heading lands in a
//! section labelled with the configured default heading ("Introduction").
//!
//! If nothing was emitted (empty input, or a document made only of
//! headings) a single fallback section is produced, headed by the caller's
//! title and holding the first `fallback_line_limit` lines of the document.

use crate::config::NotesConfig;
use crate::pipeline::heading::classify_line;
use tracing::{debug, warn};

/// A heading and the content lines that follow it, before bulletization.
///
/// `content_lines` never includes the heading line itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub heading: String,
    pub content_lines: Vec<&'a str>,
}

impl<'a> Section<'a> {
    fn open(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content_lines: Vec::new(),
        }
    }
}

/// Records whether any heading has been seen yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuilderState {
    AccumulatingIntro,
    AccumulatingSection,
}

struct SectionBuilder<'a> {
    state: BuilderState,
    pending: Section<'a>,
    closed: Vec<Section<'a>>,
}

impl<'a> SectionBuilder<'a> {
    fn new(default_heading: &str) -> Self {
        Self {
            state: BuilderState::AccumulatingIntro,
            pending: Section::open(default_heading),
            closed: Vec::new(),
        }
    }

    fn push(&mut self, line: &'a str) {
        let candidate = classify_line(line);
        match candidate.normalized_heading {
            Some(heading) if candidate.is_heading => {
                self.close_pending();
                self.pending = Section::open(heading);
                self.state = BuilderState::AccumulatingSection;
            }
            _ => self.pending.content_lines.push(line),
        }
    }

    /// Move the pending section to the output unless it is empty.
    fn close_pending(&mut self) {
        if self.pending.content_lines.is_empty() {
            return;
        }
        let heading = self.pending.heading.clone();
        let section = std::mem::replace(&mut self.pending, Section::open(heading));
        self.closed.push(section);
    }

    fn finish(mut self) -> (Vec<Section<'a>>, BuilderState) {
        self.close_pending();
        (self.closed, self.state)
    }
}

/// Group lines into sections in order of first appearance.
///
/// Always returns at least one section.
pub fn build_sections<'a>(lines: &[&'a str], title: &str, config: &NotesConfig) -> Vec<Section<'a>> {
    let mut builder = SectionBuilder::new(&config.default_heading);
    for &line in lines {
        builder.push(line);
    }
    let (sections, state) = builder.finish();

    if !sections.is_empty() {
        debug!(
            "Built {} sections ({})",
            sections.len(),
            match state {
                BuilderState::AccumulatingIntro => "no headings detected",
                BuilderState::AccumulatingSection => "headings detected",
            }
        );
        return sections;
    }

    warn!(
        "No section had content ({} lines); using fallback section '{}'",
        lines.len(),
        title
    );
    let take = lines.len().min(config.fallback_line_limit);
    vec![Section {
        heading: title.to_string(),
        content_lines: lines[..take].to_vec(),
    }]
}

//! # diamond-notes
//!
//! Turn raw, unstructured textbook chapter text into structured study notes:
//! a title, headed sections reduced to short bullet points, a short
//! conclusion and a ranked keyword list.
//!
//! ## Pipeline Overview
//!
//! ```text
//! chapter text
//!  │
//!  ├─ 1. Lines       split on any newline, trim, drop empties
//!  ├─ 2. Headings    numbered ("2.1 Forces") or short ALL-CAPS lines
//!  ├─ 3. Sections    two-state builder, "Introduction" for leading content
//!  ├─ 4. Sentences   split after . ? ! followed by whitespace
//!  ├─ 5. Bullets     ≤ 12 per section, ≤ 200 chars each
//!  ├─ 6. Conclusion  first 3 sentences of the whole document
//!  ├─ 7. Keywords    years, Capitalised words, ACRONYMS by frequency
//!  └─ 8. Render      flat text + structured NotesResult
//! ```
//!
//! Every decision is surface-syntactic. The pipeline is pure, synchronous and
//! total: any string in, a [`NotesResult`] out, byte-identical for identical
//! input.
//!
//! ## Quick Start
//!
//! ```rust
//! use diamond_notes::synthesize_notes;
//!
//! let notes = synthesize_notes(
//!     "T",
//!     "1 Introduction\nThis is a test. It has two sentences.\n2 Summary\nFinal point here.",
//! );
//! assert_eq!(notes.sections.len(), 2);
//! assert_eq!(notes.sections[0].bullets, ["This is a test.", "It has two sentences."]);
//! println!("{}", notes.render());
//! ```
//!
//! ## Collaborators
//!
//! Fetching chapter PDFs ([`fetch_document`]), turning PDF bytes into text
//! ([`extract_text`]) and the optional language-model path
//! ([`generate_with_llm`]) live beside the pipeline. None of them is needed to
//! call [`synthesize_notes`].
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `diamond-notes` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod catalog;
pub mod config;
pub mod error;
pub mod notes;
pub mod output;
pub mod pipeline;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use catalog::subjects_for_class;
pub use config::{NotesConfig, NotesConfigBuilder};
pub use error::NotesError;
pub use notes::{
    fetch_chapter_text, fetch_document, generate_notes, generate_with_llm, notes_from_source,
    notes_from_source_with, synthesize_notes, synthesize_notes_with, write_notes_to_file,
    NotesRequest,
};
pub use output::{Keyword, NotesResult, NotesSection};
pub use pipeline::extract::{extract_text, PdfTextExtractor, TextExtractor};
pub use pipeline::input::{DefaultDocumentSource, DocumentSource};
pub use pipeline::keywords::extract_keywords;
pub use pipeline::llm::{generator_from_config, LlmTextGenerator, ProxyTextGenerator, TextGenerator};
pub use prompts::{build_prompt, OutputLanguage, PromptContext};

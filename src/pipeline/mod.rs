//! Pipeline stages for notes synthesis.
//!
//! Each submodule implements exactly one transformation step, so each is
//! testable on its own and data only ever flows forward.
//!
//! ## Data Flow
//!
//! ```text
//!                         ┌──▶ sentences ──▶ bullets ──┐
//! lines ──▶ heading ──▶ sections                        ├──▶ render
//!   │                                                   │
//!   ├──────────────▶ conclusion ────────────────────────┤
//!   └──────────────▶ keywords ──────────────────────────┘
//! ```
//!
//! 1. [`lines`]: split raw text into trimmed, non-empty lines
//! 2. [`heading`]: classify one line as heading or content
//! 3. [`sections`]: group classified lines into headed sections
//! 4. [`sentences`]: punctuation-based sentence splitting
//! 5. [`bullets`]: bounded, length-capped bullet lists per section
//! 6. [`conclusion`]: first sentences of the whole document
//! 7. [`keywords`]: frequency-ranked years, names and acronyms
//! 8. [`render`]: flat text layout of a [`crate::NotesResult`]
//!
//! The collaborator stages sit outside that flow:
//!
//! - [`input`]: fetch document bytes (URL, local file, NCERT name)
//! - [`extract`]: PDF bytes → plain text
//! - [`llm`]: optional language-model generation
//! - [`postprocess`]: cleanup of generated text

pub mod bullets;
pub mod conclusion;
pub mod extract;
pub mod heading;
pub mod input;
pub mod keywords;
pub mod lines;
pub mod llm;
pub mod postprocess;
pub mod render;
pub mod sections;
pub mod sentences;

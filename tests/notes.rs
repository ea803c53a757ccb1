//! Integration tests for the public notes API.
//!
//! Everything here runs offline: documents come from an in-memory
//! `DocumentSource`, a temp file or the PDF under `tests/fixtures/`, and the
//! language model is a canned `TextGenerator`.
//!
//! Run with:
//!   cargo test --test notes

use async_trait::async_trait;
use diamond_notes::{
    generate_notes, generate_with_llm, notes_from_source, notes_from_source_with,
    subjects_for_class, synthesize_notes, write_notes_to_file, DocumentSource, NotesConfig,
    NotesError, NotesRequest, NotesResult, PdfTextExtractor, PromptContext, TextExtractor,
    TextGenerator,
};
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::Mutex;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// One-page PDF with a "1 Rivers" heading line and one body line.
const CHAPTER_PDF: &[u8] = include_bytes!("fixtures/chapter.pdf");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("diamond_notes=debug")
        .try_init();
}

/// Documents of every awkward shape the pipeline must survive.
fn corpus() -> Vec<(&'static str, String)> {
    let long_sentence = format!("{}.", "word ".repeat(80).trim_end());
    let many_sentences: String = (0..40).map(|i| format!("Point number {i} is here. ")).collect();
    let many_headings: String = (1..=60)
        .map(|i| format!("{i} Heading {i}\nBody of part {i}. More text.\n"))
        .collect();

    vec![
        ("numbered", "1 Introduction\nThis is a test. It has two sentences.\n2 Summary\nFinal point here.".to_string()),
        ("caps", "THE LIVING WORLD\nPlants grow. Animals move!\nDIVERSITY\nIs it vast? Yes.".to_string()),
        ("prose", "Gandhi returned to India in 1915.\nThe NCERT book says so.".to_string()),
        ("crlf", "1.1 First\r\nLine one.\r\n\r\n1.2 Second\rLine two.".to_string()),
        ("headings_only", "PART ONE\nPART TWO\n3 Three".to_string()),
        ("whitespace", "   \n\t\n  ".to_string()),
        ("devanagari", "भारत एक देश है। यह बड़ा है।\nGandhi ने कहा।".to_string()),
        ("long_sentence", long_sentence),
        ("many_sentences", many_sentences),
        ("many_headings", many_headings),
        ("punctuation", "Dr. Rao measured 3.14 m. \"Really?\" she asked! (NCERT) (NCERT)".to_string()),
    ]
}

fn section_headings(notes: &NotesResult) -> Vec<&str> {
    notes.sections.iter().map(|s| s.heading.as_str()).collect()
}

/// Serves documents from a map; anything else is unavailable.
struct InMemorySource {
    docs: HashMap<String, Vec<u8>>,
}

impl InMemorySource {
    fn with(id: &str, bytes: &[u8]) -> Self {
        let mut docs = HashMap::new();
        docs.insert(id.to_string(), bytes.to_vec());
        Self { docs }
    }
}

#[async_trait]
impl DocumentSource for InMemorySource {
    async fn fetch(&self, id: &str) -> Result<Vec<u8>, NotesError> {
        self.docs
            .get(id)
            .cloned()
            .ok_or_else(|| NotesError::SourceUnavailable {
                source_id: id.to_string(),
                reason: "HTTP 404 Not Found".into(),
            })
    }
}

/// Returns a canned reply and remembers the prompt it was given.
struct CannedGenerator {
    reply: Result<String, String>,
    last_prompt: Mutex<Option<String>>,
}

impl CannedGenerator {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            last_prompt: Mutex::new(None),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            last_prompt: Mutex::new(None),
        }
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, NotesError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply.clone().map_err(|message| NotesError::LlmApiError { message })
    }
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn numbered_headings_scenario() {
    let notes = synthesize_notes(
        "T",
        "1 Introduction\nThis is a test. It has two sentences.\n2 Summary\nFinal point here.",
    );

    assert_eq!(notes.title, "T");
    assert_eq!(section_headings(&notes), vec!["1 Introduction", "2 Summary"]);
    assert_eq!(
        notes.sections[0].bullets,
        vec!["This is a test.", "It has two sentences."]
    );
    assert_eq!(notes.sections[1].bullets, vec!["Final point here."]);
    assert_eq!(
        notes.conclusion,
        "1 Introduction This is a test. It has two sentences. 2 Summary Final point here."
    );
    assert_eq!(
        notes.keywords,
        vec!["Introduction", "This", "It", "Summary", "Final"]
    );
}

#[test]
fn unstructured_text_is_a_single_section() {
    let notes = synthesize_notes(
        "Forces",
        "objects fall when dropped. they speed up as they fall.\nair slows them down.",
    );
    assert_eq!(section_headings(&notes), vec!["Introduction"]);
    assert_eq!(
        notes.sections[0].bullets,
        vec![
            "objects fall when dropped.",
            "they speed up as they fall.",
            "air slows them down."
        ]
    );
}

#[test]
fn headings_only_document_falls_back_to_title() {
    let notes = synthesize_notes("Chapter 3", "PART ONE\nPART TWO");
    assert_eq!(section_headings(&notes), vec!["Chapter 3"]);
    assert_eq!(notes.sections[0].bullets, vec!["PART ONE PART TWO"]);
}

#[test]
fn long_sentence_is_truncated_to_200_chars() {
    let sentence = format!("{}.", "a".repeat(249));
    assert_eq!(sentence.chars().count(), 250);

    let notes = synthesize_notes("T", &sentence);
    let bullet = &notes.sections[0].bullets[0];
    assert_eq!(bullet.chars().count(), 200);
    assert!(bullet.ends_with("..."));
    assert_eq!(&bullet[..197], &sentence[..197]);
}

#[test]
fn keyword_ties_keep_first_occurrence_order() {
    let text = "NCERT published in 1947. Gandhi led.\n\
                NCERT 1947 Gandhi.\n\
                Gandhi and NCERT in 1947.";
    let notes = synthesize_notes("History", text);
    assert_eq!(notes.keywords, vec!["NCERT", "1947", "Gandhi"]);
}

#[test]
fn rendered_notes_have_every_block() {
    let notes = synthesize_notes(
        "T",
        "1 Introduction\nThis is a test. It has two sentences.\n2 Summary\nFinal point here.",
    );
    let text = notes.render();

    assert!(text.starts_with("Chapter Title: T\n\n"));
    assert!(text.contains("1 Introduction\n- This is a test.\n- It has two sentences.\n\n"));
    assert!(text.contains("2 Summary\n- Final point here.\n\n"));
    assert!(text.contains("Conclusion:\n1 Introduction This is a test."));
    assert!(text.ends_with("Keywords to Remember:\nIntroduction, This, It, Summary, Final\n"));
}

// ── Properties over the corpus ───────────────────────────────────────────────

#[test]
fn always_at_least_one_section() {
    for (name, doc) in corpus() {
        let notes = synthesize_notes("Title", &doc);
        assert!(!notes.sections.is_empty(), "[{name}] no sections");
    }
}

#[test]
fn bullets_respect_count_and_length_limits() {
    for (name, doc) in corpus() {
        let notes = synthesize_notes("Title", &doc);
        for section in &notes.sections {
            assert!(
                section.bullets.len() <= 12,
                "[{name}] {} bullets under '{}'",
                section.bullets.len(),
                section.heading
            );
            for bullet in &section.bullets {
                assert!(bullet.chars().count() <= 200, "[{name}] bullet too long: {bullet}");
                assert!(!bullet.trim().is_empty(), "[{name}] blank bullet");
                assert!(!bullet.contains("  "), "[{name}] uncollapsed whitespace");
            }
        }
    }
}

#[test]
fn keywords_are_bounded_and_unique() {
    for (name, doc) in corpus() {
        let notes = synthesize_notes("Title", &doc);
        assert!(notes.keywords.len() <= 15, "[{name}] {} keywords", notes.keywords.len());
        let unique: HashSet<&String> = notes.keywords.iter().collect();
        assert_eq!(unique.len(), notes.keywords.len(), "[{name}] duplicate keywords");
    }
}

#[test]
fn synthesis_is_deterministic() {
    for (name, doc) in corpus() {
        let a = synthesize_notes("Title", &doc);
        let b = synthesize_notes("Title", &doc);
        assert_eq!(a, b, "[{name}] structured output differs");
        assert_eq!(a.render(), b.render(), "[{name}] rendered output differs");
    }
}

#[test]
fn headings_keep_document_order() {
    let notes = synthesize_notes("T", &corpus()[9].1);
    let headings = section_headings(&notes);
    assert_eq!(headings.len(), 60);
    for (i, heading) in headings.iter().enumerate() {
        assert_eq!(*heading, format!("{} Heading {}", i + 1, i + 1));
    }
}

#[test]
fn many_sentences_are_capped_at_twelve() {
    let notes = synthesize_notes("T", &corpus()[8].1);
    assert_eq!(notes.sections[0].bullets.len(), 12);
    assert_eq!(notes.sections[0].bullets[11], "Point number 11 is here.");
    assert_eq!(
        notes.conclusion,
        "Point number 0 is here. Point number 1 is here. Point number 2 is here."
    );
}

#[test]
fn json_shape_is_stable() {
    let notes = synthesize_notes("T", "OVERVIEW\nOne point.");
    let value = serde_json::to_value(&notes).unwrap();
    assert_eq!(value["title"], "T");
    assert_eq!(value["sections"][0]["heading"], "OVERVIEW");
    assert_eq!(value["sections"][0]["bullets"][0], "One point.");
    assert_eq!(value["conclusion"], "OVERVIEW One point.");

    let back: NotesResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, notes);
}

// ── Requests and configuration ───────────────────────────────────────────────

#[test]
fn request_with_missing_text_is_invalid() {
    let request: NotesRequest = serde_json::from_str(r#"{"chapterTitle":"Forces"}"#).unwrap();
    let err = generate_notes(&request, &NotesConfig::default()).unwrap_err();
    assert!(matches!(err, NotesError::InvalidRequest(_)));
    assert!(err.to_string().contains("Both chapterTitle and chapterText are required"));
    assert!(!err.is_retryable());
}

#[test]
fn request_runs_the_pipeline() {
    let request: NotesRequest =
        serde_json::from_str(r#"{"chapterTitle":"Forces","chapterText":"Push. Pull."}"#).unwrap();
    let notes = generate_notes(&request, &NotesConfig::default()).unwrap();
    assert_eq!(notes, synthesize_notes("Forces", "Push. Pull."));
}

#[test]
fn custom_limits_are_honoured() {
    let config = NotesConfig::builder()
        .max_bullets(2)
        .max_bullet_chars(10)
        .max_keywords(1)
        .conclusion_sentences(1)
        .build()
        .unwrap();
    let request = NotesRequest::new(
        "T",
        "Alpha goes first here. Beta second. Gamma third. Delta fourth.",
    );
    let notes = generate_notes(&request, &config).unwrap();

    assert_eq!(notes.sections[0].bullets, vec!["Alpha g...", "Beta se..."]);
    assert_eq!(notes.conclusion, "Alpha goes first here.");
    assert_eq!(notes.keywords, vec!["Alpha"]);
}

#[test]
fn subjects_cover_every_class() {
    for class_level in 1..=12u8 {
        let subjects = subjects_for_class(class_level).unwrap();
        assert!(subjects.contains(&"English"), "class {class_level}");
    }
    assert!(subjects_for_class(0).is_err());
    assert!(subjects_for_class(13).is_err());
}

// ── Document sources ─────────────────────────────────────────────────────────

#[tokio::test]
async fn notes_from_in_memory_source() {
    init_tracing();
    let source = InMemorySource::with("jess101.pdf", b"1 Rivers\nRivers flow. The Ganga is long.");
    let notes = notes_from_source_with(
        &source,
        PdfTextExtractor,
        "jess101.pdf",
        "Rivers",
        &NotesConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(section_headings(&notes), vec!["1 Rivers"]);
    assert_eq!(notes.sections[0].bullets, vec!["Rivers flow.", "The Ganga is long."]);
}

#[tokio::test]
async fn notes_from_pdf_document() {
    init_tracing();
    let source = InMemorySource::with("jess101.pdf", CHAPTER_PDF);
    let notes = notes_from_source_with(
        &source,
        PdfTextExtractor,
        "jess101.pdf",
        "Rivers",
        &NotesConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(section_headings(&notes), vec!["1 Rivers"]);
    assert_eq!(notes.sections[0].bullets, vec!["Rivers flow.", "The Ganga is long."]);
    assert_eq!(notes.keywords, vec!["Rivers", "The", "Ganga"]);
}

/// Decodes bytes as Latin-1, as a legacy text export would need.
struct Latin1Extractor;

impl TextExtractor for Latin1Extractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, NotesError> {
        Ok(bytes.iter().map(|&b| b as char).collect())
    }
}

#[tokio::test]
async fn custom_extractor_is_used() {
    let source = InMemorySource::with("scan.bin", b"OVERVIEW\nCaf\xe9 culture grew.");
    let notes = notes_from_source_with(
        &source,
        Latin1Extractor,
        "scan.bin",
        "T",
        &NotesConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(section_headings(&notes), vec!["OVERVIEW"]);
    assert_eq!(notes.sections[0].bullets, vec!["Café culture grew."]);
}

#[tokio::test]
async fn unavailable_source_is_reported() {
    let source = InMemorySource::with("a.pdf", b"x");
    let err = notes_from_source_with(
        &source,
        PdfTextExtractor,
        "missing.pdf",
        "T",
        &NotesConfig::default(),
    )
    .await
    .unwrap_err();
    match err {
        NotesError::SourceUnavailable { source_id, .. } => assert_eq!(source_id, "missing.pdf"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn blank_document_needs_manual_entry() {
    let source = InMemorySource::with("scan.pdf", b"   \n  ");
    let err = notes_from_source_with(
        &source,
        PdfTextExtractor,
        "scan.pdf",
        "T",
        &NotesConfig::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, NotesError::ExtractionFailed { .. }));
    assert!(err.to_string().contains("Paste the chapter text manually"));
}

#[tokio::test]
async fn source_requires_a_title() {
    let source = InMemorySource::with("a.pdf", b"Body.");
    let err = notes_from_source_with(
        &source,
        PdfTextExtractor,
        "a.pdf",
        "  ",
        &NotesConfig::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, NotesError::InvalidRequest(_)));
}

#[tokio::test]
async fn notes_from_local_file() {
    init_tracing();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "SOIL\nSoil forms slowly. It holds water.").unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let notes = notes_from_source(&path, "Soil", &NotesConfig::default())
        .await
    .unwrap();

    assert_eq!(section_headings(&notes), vec!["SOIL"]);
    assert_eq!(notes.sections[0].bullets, vec!["Soil forms slowly.", "It holds water."]);
}

// ── Generative path ──────────────────────────────────────────────────────────

#[tokio::test]
async fn generated_notes_are_cleaned() {
    let generator =
        CannedGenerator::replying("```markdown\r\nChapter Title: Soil  \r\n- Soil holds water.\r\n```");
    let ctx = PromptContext::new(7, "Science").with_chapter_name("Soil");

    let notes = generate_with_llm(&generator, &ctx, "Soil forms slowly.")
        .await
    .unwrap();
    assert_eq!(notes, "Chapter Title: Soil\n- Soil holds water.\n");

    let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("Class 7, Subject: Science, Chapter: Soil"));
    assert!(prompt.contains("Soil forms slowly."));
}

#[tokio::test]
async fn generator_errors_propagate() {
    let generator = CannedGenerator::failing("429 Too Many Requests");
    let ctx = PromptContext::new(10, "History");

    let err = generate_with_llm(&generator, &ctx, "Text.").await.unwrap_err();
    assert!(matches!(err, NotesError::LlmApiError { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn blank_text_never_reaches_the_generator() {
    let generator = CannedGenerator::replying("unused");
    let ctx = PromptContext::new(10, "History");

    let err = generate_with_llm(&generator, &ctx, " \n ").await.unwrap_err();
    assert!(matches!(err, NotesError::InvalidRequest(_)));
    assert!(generator.last_prompt.lock().unwrap().is_none());
}

// ── Output ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn notes_are_written_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("notes.txt");
    let rendered = synthesize_notes("T", "OVERVIEW\nOne point.").render();

    write_notes_to_file(&rendered, &path).await.unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), rendered);
    assert!(!dir.path().join("out").join("notes.txt.tmp").exists());
}

//! CLI binary for diamond-notes.
//!
//! A thin shim over the library crate that maps CLI flags to `NotesConfig`
//! and prints results.

use anyhow::{bail, Context, Result};
use clap::Parser;
use diamond_notes::{
    build_prompt, catalog, fetch_chapter_text, generate_with_llm, generator_from_config,
    subjects_for_class, synthesize_notes_with, write_notes_to_file, NotesConfig, OutputLanguage,
    PromptContext,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers ──────────────────────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Notes from a local text file (stdout)
  diamond-notes chapter1.txt --title "The Living World"

  # Notes from an NCERT textbook file name (downloaded from ncert.nic.in)
  diamond-notes lehi1.pdf --title "Theme 1" -o theme1.txt

  # Structured JSON
  diamond-notes chapter1.txt --title "Forces" --json > notes.json

  # Paste text on stdin
  pbpaste | diamond-notes - --title "Motion"

  # Subjects offered for a class
  diamond-notes --list-subjects --class 11

  # Print the prompt a language model would receive
  diamond-notes chapter1.txt --title "Forces" --class 8 --subject Science --prompt-only

  # Let a language model write the notes instead
  diamond-notes chapter1.txt --title "Forces" --class 8 --subject Science --llm

  # Same, through a notes proxy that holds the API key
  diamond-notes chapter1.txt --class 8 --subject Science --llm \
      --proxy-url https://notes.example.com/api/generate

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY               OpenAI API key (only for --llm)
  ANTHROPIC_API_KEY            Anthropic API key (only for --llm)
  EDGEQUAKE_PROVIDER           Override provider
  EDGEQUAKE_MODEL              Override model ID
  DIAMOND_NOTES_BASE_URL       Host for bare textbook file names
  DIAMOND_NOTES_PROXY_URL      Notes proxy endpoint for --llm
  RUST_LOG                     Log filter (overrides --verbose / --quiet)
"#;

/// Turn textbook chapters into concise revision notes.
#[derive(Parser, Debug)]
#[command(
    name = "diamond-notes",
    version,
    about = "Turn textbook chapters into concise revision notes",
    long_about = "Turn a textbook chapter (text file, PDF, URL or NCERT file name) into \
Diamond Notes: headed sections of short bullets, a brief conclusion and the keywords to \
remember. The notes are built deterministically without any network model; --llm asks a \
language model instead.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Text/PDF file, HTTP(S) URL, NCERT file name, or `-` for stdin.
    input: Option<String>,

    /// Chapter title. Defaults to the input's file stem.
    #[arg(short, long, env = "DIAMOND_NOTES_TITLE")]
    title: Option<String>,

    /// Write notes to this file instead of stdout.
    #[arg(short, long, env = "DIAMOND_NOTES_OUTPUT")]
    output: Option<PathBuf>,

    /// Output structured JSON (NotesResult) instead of text.
    #[arg(long, env = "DIAMOND_NOTES_JSON")]
    json: bool,

    /// Print the language-model prompt and exit.
    #[arg(long)]
    prompt_only: bool,

    /// Ask a language model for the notes.
    #[arg(long, env = "DIAMOND_NOTES_LLM")]
    llm: bool,

    /// Class level (1-12), used for prompts and --list-subjects.
    #[arg(long, env = "DIAMOND_NOTES_CLASS",
          value_parser = clap::value_parser!(u8).range(1..=12))]
    class: Option<u8>,

    /// Subject name, used for prompts.
    #[arg(long, env = "DIAMOND_NOTES_SUBJECT")]
    subject: Option<String>,

    /// Language of model-written notes.
    #[arg(long, env = "DIAMOND_NOTES_LANGUAGE", value_enum, default_value = "english")]
    language: LanguageArg,

    /// List the subjects offered for --class and exit.
    #[arg(long)]
    list_subjects: bool,

    /// LLM model ID (only for --llm).
    #[arg(long, env = "EDGEQUAKE_MODEL")]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    #[arg(long, env = "EDGEQUAKE_PROVIDER")]
    provider: Option<String>,

    /// POST prompts to this notes proxy instead of calling a provider (with --llm).
    #[arg(long, env = "DIAMOND_NOTES_PROXY_URL")]
    proxy_url: Option<String>,

    /// Per-request generation timeout in seconds.
    #[arg(long, env = "DIAMOND_NOTES_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// Host that bare textbook file names are fetched from.
    #[arg(long, env = "DIAMOND_NOTES_BASE_URL")]
    base_url: Option<String>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DIAMOND_NOTES_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DIAMOND_NOTES_QUIET")]
    quiet: bool,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "DIAMOND_NOTES_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum LanguageArg {
    English,
    Hindi,
}

impl From<LanguageArg> for OutputLanguage {
    fn from(v: LanguageArg) -> Self {
        match v {
            LanguageArg::English => OutputLanguage::English,
            LanguageArg::Hindi => OutputLanguage::Hindi,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── List-subjects mode ───────────────────────────────────────────────
    if cli.list_subjects {
        let class_level = cli
            .class
            .context("--list-subjects needs --class <1-12>")?;
        let subjects = subjects_for_class(class_level)?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&subjects).context("Failed to serialise subjects")?
            );
        } else {
            for subject in subjects {
                println!("{subject}");
            }
        }
        return Ok(());
    }

    let Some(input) = cli.input.as_deref() else {
        bail!("No input given. Pass a file, URL, NCERT file name or `-` for stdin.");
    };
    let title = resolve_title(input, cli.title.as_deref())?;
    let config = build_config(&cli)?;

    let start = Instant::now();
    let spinner = (!cli.quiet && !cli.verbose).then(|| new_spinner("Reading chapter…"));

    let chapter_text = read_chapter(input, &config)
        .await
        .with_context(|| format!("Failed to read chapter from '{input}'"))?;

    // ── Prompt / generative modes ────────────────────────────────────────
    if cli.prompt_only || cli.llm {
        let ctx = prompt_context(&cli, &title)?;

        if cli.prompt_only {
            if let Some(bar) = spinner {
                bar.finish_and_clear();
            }
            return emit(&cli, &build_prompt(&ctx, &chapter_text)).await;
        }

        if let Some(ref bar) = spinner {
            bar.set_message("Waiting for the model…");
        }
        let generator = generator_from_config(&config)?;
        let notes = generate_with_llm(generator.as_ref(), &ctx, &chapter_text)
            .await
            .context("Generation failed")?;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }
        emit(&cli, &notes).await?;
        summary(&cli, &format!("model notes for '{title}'"), start);
        return Ok(());
    }

    // ── Synthesis ────────────────────────────────────────────────────────
    let notes = synthesize_notes_with(&title, &chapter_text, &config);
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let rendered = if cli.json {
        serde_json::to_string_pretty(&notes).context("Failed to serialise notes")? + "\n"
    } else {
        notes.render()
    };
    emit(&cli, &rendered).await?;

    summary(
        &cli,
        &format!(
            "{} sections, {} bullets, {} keywords",
            notes.sections.len(),
            notes.bullet_count(),
            notes.keywords.len()
        ),
        start,
    );
    Ok(())
}

/// Map CLI args to `NotesConfig`.
fn build_config(cli: &Cli) -> Result<NotesConfig> {
    let mut builder = NotesConfig::builder()
        .download_timeout_secs(cli.download_timeout)
        .api_timeout_secs(cli.api_timeout);

    if let Some(ref url) = cli.base_url {
        builder = builder.source_base_url(url.clone());
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model.clone());
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider.clone());
    }
    if let Some(ref url) = cli.proxy_url {
        builder = builder.proxy_url(url.clone());
    }

    builder.build().context("Invalid configuration")
}

/// Read chapter text from stdin, a file, a URL or an NCERT file name.
async fn read_chapter(input: &str, config: &NotesConfig) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }

    Ok(fetch_chapter_text(input, config).await?)
}

/// Use `--title` when given, otherwise the input's file stem.
fn resolve_title(input: &str, title: Option<&str>) -> Result<String> {
    if let Some(t) = title.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(t.to_string());
    }
    let stem = Path::new(input.trim_end_matches('/'))
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && *s != "-");
    match stem {
        Some(s) => Ok(s.to_string()),
        None => bail!("A chapter title is required (--title) when reading from stdin"),
    }
}

fn prompt_context(cli: &Cli, title: &str) -> Result<PromptContext> {
    let class_level = cli
        .class
        .context("--prompt-only and --llm need --class <1-12>")?;
    let subject = cli
        .subject
        .as_deref()
        .context("--prompt-only and --llm need --subject")?;
    if !catalog::is_known_subject(class_level, subject) {
        tracing::warn!("'{subject}' is not a listed subject for class {class_level}");
    }
    Ok(PromptContext::new(class_level, subject)
        .with_chapter_name(title)
        .with_language(cli.language.clone().into()))
}

/// Write `contents` to `--output` or stdout.
async fn emit(cli: &Cli, contents: &str) -> Result<()> {
    if let Some(ref path) = cli.output {
        write_notes_to_file(contents, path)
            .await
            .context("Failed to write notes")?;
        return Ok(());
    }

    write_text(&mut io::stdout().lock(), contents).context("Failed to write to stdout")
}

/// Write `contents`, adding a trailing newline when it lacks one.
fn write_text<W: Write>(out: &mut W, contents: &str) -> io::Result<()> {
    out.write_all(contents.as_bytes())?;
    if !contents.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}

fn summary(cli: &Cli, what: &str, start: Instant) {
    if cli.quiet {
        return;
    }
    let target = cli
        .output
        .as_ref()
        .map(|p| format!("  →  {}", bold(&p.display().to_string())))
        .unwrap_or_default();
    eprintln!(
        "{} {}  {}{}",
        green("✔"),
        what,
        dim(&format!("{}ms", start.elapsed().as_millis())),
        target
    );
}

fn new_spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts `budget` bytes, then fails every write.
    struct ShortWriter {
        written: Vec<u8>,
        budget: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.budget {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_text_appends_missing_newline() {
        let mut out = Vec::new();
        write_text(&mut out, "Chapter Title: T").unwrap();
        assert_eq!(out, b"Chapter Title: T\n");

        let mut out = Vec::new();
        write_text(&mut out, "done\n").unwrap();
        assert_eq!(out, b"done\n");
    }

    #[test]
    fn write_text_reports_failed_trailing_newline() {
        let mut out = ShortWriter {
            written: Vec::new(),
            budget: 4,
        };
        let err = write_text(&mut out, "text").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(out.written, b"text");
    }

    #[test]
    fn title_defaults_to_file_stem() {
        assert_eq!(resolve_title("chapters/lehi1.pdf", None).unwrap(), "lehi1");
        assert_eq!(resolve_title("x.txt", Some("  Forces ")).unwrap(), "Forces");
        assert!(resolve_title("-", None).is_err());
    }

    #[test]
    fn proxy_flag_reaches_config() {
        let cli = Cli::parse_from([
            "diamond-notes",
            "ch1.txt",
            "--llm",
            "--proxy-url",
            "http://127.0.0.1:8080/api/generate",
            "--api-timeout",
            "30",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(
            config.proxy_url.as_deref(),
            Some("http://127.0.0.1:8080/api/generate")
        );
        assert_eq!(config.api_timeout_secs, 30);
    }
}

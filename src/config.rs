//! Configuration for notes synthesis and its collaborators.
//!
//! All behaviour is controlled through [`NotesConfig`], built via its
//! [`NotesConfigBuilder`]. The defaults reproduce the reference output
//! format exactly; the limits are exposed so callers can produce shorter
//! handouts without forking the pipeline.

use crate::error::NotesError;
use edgequake_llm::LLMProvider;
use std::fmt;
use std::sync::Arc;

/// Default NCERT textbook host used for bare file names such as `lehi1.pdf`.
pub const DEFAULT_SOURCE_BASE_URL: &str = "https://ncert.nic.in/textbook/pdf/";

/// Default model for the optional generative path.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for notes synthesis.
///
/// Built via [`NotesConfig::builder()`] or using [`NotesConfig::default()`].
///
/// # Example
/// ```rust
/// use diamond_notes::NotesConfig;
///
/// let config = NotesConfig::builder()
///     .max_bullets(8)
///     .max_keywords(10)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_bullet_chars, 200);
/// ```
#[derive(Clone)]
pub struct NotesConfig {
    /// Maximum bullets kept per section. Default: 12.
    pub max_bullets: usize,

    /// Maximum characters per bullet, ellipsis included. Default: 200.
    ///
    /// Longer bullets keep their first `max_bullet_chars - 3` characters
    /// followed by `...`.
    pub max_bullet_chars: usize,

    /// Number of leading sentences joined into the conclusion. Default: 3.
    pub conclusion_sentences: usize,

    /// Maximum keywords returned. Default: 15.
    pub max_keywords: usize,

    /// Lines copied into the fallback section when no section survives. Default: 200.
    pub fallback_line_limit: usize,

    /// Heading of the section that collects content seen before the first
    /// detected heading. Default: "Introduction".
    pub default_heading: String,

    /// Base URL joined with bare document identifiers. Default: NCERT textbook host.
    pub source_base_url: String,

    /// Download timeout for remote documents in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// LLM model identifier. If None, uses [`DEFAULT_MODEL`].
    pub model: Option<String>,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature for the generative path. Default: 0.2.
    pub temperature: f32,

    /// Maximum tokens the LLM may generate. Default: 2500.
    pub max_tokens: usize,

    /// Retry attempts on a failed LLM call. Default: 3.
    pub max_retries: u32,

    /// Initial retry delay in milliseconds, doubled per attempt. Default: 500.
    pub retry_backoff_ms: u64,

    /// Notes proxy endpoint. When set, prompts are POSTed here instead of
    /// going to a provider directly.
    pub proxy_url: Option<String>,

    /// Timeout for a single generation request in seconds. Default: 120.
    pub api_timeout_secs: u64,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            max_bullets: 12,
            max_bullet_chars: 200,
            conclusion_sentences: 3,
            max_keywords: 15,
            fallback_line_limit: 200,
            default_heading: "Introduction".to_string(),
            source_base_url: DEFAULT_SOURCE_BASE_URL.to_string(),
            download_timeout_secs: 120,
            model: None,
            provider_name: None,
            provider: None,
            temperature: 0.2,
            max_tokens: 2500,
            max_retries: 3,
            retry_backoff_ms: 500,
            proxy_url: None,
            api_timeout_secs: 120,
        }
    }
}

impl fmt::Debug for NotesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotesConfig")
            .field("max_bullets", &self.max_bullets)
            .field("max_bullet_chars", &self.max_bullet_chars)
            .field("conclusion_sentences", &self.conclusion_sentences)
            .field("max_keywords", &self.max_keywords)
            .field("fallback_line_limit", &self.fallback_line_limit)
            .field("default_heading", &self.default_heading)
            .field("source_base_url", &self.source_base_url)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_retries", &self.max_retries)
            .field("proxy_url", &self.proxy_url)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .finish()
    }
}

impl NotesConfig {
    /// Create a new builder for `NotesConfig`.
    pub fn builder() -> NotesConfigBuilder {
        NotesConfigBuilder {
            config: Self::default(),
        }
    }

    /// The model to request from the provider.
    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

/// Builder for [`NotesConfig`].
#[derive(Debug)]
pub struct NotesConfigBuilder {
    config: NotesConfig,
}

impl NotesConfigBuilder {
    pub fn max_bullets(mut self, n: usize) -> Self {
        self.config.max_bullets = n;
        self
    }

    pub fn max_bullet_chars(mut self, n: usize) -> Self {
        self.config.max_bullet_chars = n;
        self
    }

    pub fn conclusion_sentences(mut self, n: usize) -> Self {
        self.config.conclusion_sentences = n;
        self
    }

    pub fn max_keywords(mut self, n: usize) -> Self {
        self.config.max_keywords = n;
        self
    }

    pub fn fallback_line_limit(mut self, n: usize) -> Self {
        self.config.fallback_line_limit = n;
        self
    }

    pub fn default_heading(mut self, heading: impl Into<String>) -> Self {
        self.config.default_heading = heading.into();
        self
    }

    pub fn source_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.source_base_url = url.into();
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(url.into());
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<NotesConfig, NotesError> {
        let c = &self.config;
        if c.max_bullets == 0 {
            return Err(NotesError::InvalidConfig(
                "max_bullets must be ≥ 1".into(),
            ));
        }
        if c.max_bullet_chars < 4 {
            return Err(NotesError::InvalidConfig(format!(
                "max_bullet_chars must leave room for the ellipsis (≥ 4), got {}",
                c.max_bullet_chars
            )));
        }
        if c.max_keywords == 0 {
            return Err(NotesError::InvalidConfig(
                "max_keywords must be ≥ 1".into(),
            ));
        }
        if c.default_heading.trim().is_empty() {
            return Err(NotesError::InvalidConfig(
                "default_heading must not be blank".into(),
            ));
        }
        if c.source_base_url.trim().is_empty() {
            return Err(NotesError::InvalidConfig(
                "source_base_url must not be blank".into(),
            ));
        }
        if let Some(ref url) = c.proxy_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(NotesError::InvalidConfig(format!(
                    "proxy_url must be an http(s) URL, got '{url}'"
                )));
            }
        }
        Ok(self.config)
    }
}

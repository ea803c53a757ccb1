//! Optional generative path: send the composed prompt to a language model.
//!
//! The notes pipeline never depends on this module. It exists for callers
//! who prefer model-written notes; the prompt itself lives in
//! [`crate::prompts`]. Two generators are provided:
//!
//! - [`LlmTextGenerator`] calls a provider directly with a local API key.
//! - [`ProxyTextGenerator`] POSTs `{"prompt": ...}` to a notes proxy that
//!   holds the key server-side and uses the reply body as the notes.
//!
//! ## Retry Strategy
//!
//! Provider errors that edgequake-llm classifies as transient (rate limits,
//! network failures, 5xx) are retried with exponential backoff
//! (`retry_backoff_ms * 2^attempt`): 500 ms → 1 s → 2 s by default.
//! Authentication, invalid-request, unknown-model and token-limit errors
//! fail on the first attempt. The proxy generator never retries.

use crate::config::NotesConfig;
use crate::error::NotesError;
use crate::prompts::GENERATOR_SYSTEM_PROMPT;
use async_trait::async_trait;
use edgequake_llm::{
    ChatMessage, CompletionOptions, LLMProvider, LlmError, ProviderFactory, RetryStrategy,
};
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

/// A free-form text completion service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete `prompt`, returning the raw generated text.
    async fn generate(&self, prompt: &str) -> Result<String, NotesError>;
}

/// [`TextGenerator`] backed by an `edgequake-llm` provider.
pub struct LlmTextGenerator {
    provider: Arc<dyn LLMProvider>,
    options: CompletionOptions,
    max_retries: u32,
    retry_backoff_ms: u64,
}

impl LlmTextGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &NotesConfig) -> Self {
        Self {
            provider,
            options: build_options(config),
            max_retries: config.max_retries,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }

    /// Resolve the provider from `config` and the environment.
    pub fn from_config(config: &NotesConfig) -> Result<Self, NotesError> {
        let provider = resolve_provider(config)?;
        Ok(Self::new(provider, config))
    }
}

#[async_trait]
impl TextGenerator for LlmTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, NotesError> {
        let start = Instant::now();
        let messages = vec![
            ChatMessage::system(GENERATOR_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ];

        let mut last_err: Option<String> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let backoff = self.retry_backoff_ms * 2u64.pow(attempt - 1);
                warn!(
                    "Generation: retry {}/{} after {}ms",
                    attempt, self.max_retries, backoff
                );
                sleep(Duration::from_millis(backoff)).await;
            }

            match self.provider.chat(&messages, Some(&self.options)).await {
                Ok(response) => {
                    debug!(
                        "Generation: {} input tokens, {} output tokens, {:?}",
                        response.prompt_tokens,
                        response.completion_tokens,
                        start.elapsed()
                    );
                    return Ok(response.content);
                }
                Err(e) if !is_transient(&e) => {
                    warn!("Generation: permanent failure, not retrying: {}", e);
                    return Err(NotesError::LlmApiError {
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    warn!("Generation: attempt {} failed: {}", attempt + 1, err_msg);
                    last_err = Some(err_msg);
                }
            }
        }

        Err(NotesError::LlmApiError {
            message: format!(
                "failed after {} retries: {}",
                self.max_retries,
                last_err.unwrap_or_else(|| "Unknown error".to_string())
            ),
        })
    }
}

/// Whether another attempt could succeed with the same prompt.
fn is_transient(error: &LlmError) -> bool {
    !matches!(
        error.retry_strategy(),
        RetryStrategy::NoRetry | RetryStrategy::ReduceContext
    )
}

/// [`TextGenerator`] that forwards prompts to a notes proxy over HTTP.
///
/// The proxy receives `{"prompt": "..."}` and answers with the notes as the
/// response body. A raw chat-completion JSON body is also accepted, in which
/// case the first choice's message content is used.
#[derive(Debug, Clone)]
pub struct ProxyTextGenerator {
    url: String,
    timeout_secs: u64,
}

impl ProxyTextGenerator {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            url: url.into(),
            timeout_secs,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TextGenerator for ProxyTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, NotesError> {
        let start = Instant::now();
        info!("Generation: sending prompt to proxy {}", self.url);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| NotesError::Internal(format!("HTTP client: {e}")))?;

        let payload = serde_json::to_vec(&serde_json::json!({ "prompt": prompt }))
            .map_err(|e| NotesError::Internal(format!("proxy payload: {e}")))?;

        let proxy_failed = |message: String| NotesError::LlmApiError { message };

        let response = client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    proxy_failed(format!("proxy timed out after {}s", self.timeout_secs))
                } else {
                    proxy_failed(format!("proxy unreachable: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| proxy_failed(format!("proxy response unreadable: {e}")))?;

        if !status.is_success() {
            let detail = body.trim();
            return Err(proxy_failed(if detail.is_empty() {
                format!("Proxy error (HTTP {status})")
            } else {
                detail.to_string()
            }));
        }

        debug!(
            "Generation: proxy replied {} chars in {:?}",
            body.len(),
            start.elapsed()
        );
        Ok(proxy_reply_text(body))
    }
}

/// Notes text from a proxy reply body.
fn proxy_reply_text(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v["choices"][0]["message"]["content"]
                .as_str()
                .map(str::to_owned)
        })
        .unwrap_or(body)
}

/// Pick the generator `config` asks for: the proxy when `proxy_url` is set,
/// otherwise a direct provider.
pub fn generator_from_config(config: &NotesConfig) -> Result<Box<dyn TextGenerator>, NotesError> {
    match config.proxy_url {
        Some(ref url) => Ok(Box::new(ProxyTextGenerator::new(
            url.clone(),
            config.api_timeout_secs,
        ))),
        None => Ok(Box::new(LlmTextGenerator::from_config(config)?)),
    }
}

/// Build `CompletionOptions` from the notes config.
fn build_options(config: &NotesConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        ..Default::default()
    }
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. A pre-built provider in `config.provider`.
/// 2. `config.provider_name` with `config.model` (or the default model).
/// 3. `OPENAI_API_KEY` in the environment → OpenAI.
/// 4. Whatever `ProviderFactory::from_env` can detect.
pub fn resolve_provider(config: &NotesConfig) -> Result<Arc<dyn LLMProvider>, NotesError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        return create_provider(name, config.model_or_default());
    }

    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            return create_provider("openai", config.model_or_default());
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| NotesError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or pass --provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}

fn create_provider(provider_name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, NotesError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        NotesError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

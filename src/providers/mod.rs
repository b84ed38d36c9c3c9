//! Model provider abstraction.
//!
//! Defines the [`LlmProvider`] trait and shared plumbing used by both
//! provider implementations:
//! - [`anthropic::AnthropicProvider`] — Anthropic `/v1/messages` API
//! - [`ollama::OllamaProvider`] — Ollama `/api/chat` API
//!
//! Every call is a single isolated prompt (system prompt plus one user
//! message), never part of an ongoing conversation, so pattern inputs
//! and intermediate output stay out of any caller's context.

use async_trait::async_trait;
use regex::Regex;

use crate::credentials::Credentials;

pub mod anthropic;
pub mod ollama;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by model providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP transport failure.
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Response did not match expected schema.
    #[error("provider response parse error: {0}")]
    Parse(String),
    /// Upstream provider responded with an error status.
    #[error("provider returned non-success status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Sanitized response body.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// HTTP helpers (shared by both providers)
// ---------------------------------------------------------------------------

/// Check HTTP response status and return body text or a structured error.
///
/// # Errors
///
/// Returns `ProviderError::Request` on transport failure,
/// `ProviderError::HttpStatus` on non-2xx.
pub async fn check_http_response(response: reqwest::Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ProviderError::HttpStatus {
            status: status.as_u16(),
            body: sanitize_http_error_body(&body),
        });
    }
    Ok(body)
}

fn sanitize_http_error_body(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut sanitized = collapsed;
    for pattern in [
        r"sk-ant-[A-Za-z0-9_\-]{10,}",
        r"sk-[A-Za-z0-9]{32,}",
        r"ghp_[A-Za-z0-9]{20,}",
    ] {
        if let Ok(regex) = Regex::new(pattern) {
            sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
        }
    }

    const MAX_ERROR_BODY_CHARS: usize = 256;
    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    sanitized
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Core model provider interface.
///
/// Implementations must be `Send + Sync` so the runner can hold them
/// behind an `Arc`.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one isolated prompt and return the model's text.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on API, network, or parse failure.
    async fn prompt(&self, user_text: &str, system: &str) -> Result<String, ProviderError>;

    /// The model spec string this provider is instantiated for.
    fn model_id(&self) -> &str;
}

// Debug on the trait object (rather than a supertrait) so implementors
// holding secrets never need a key-bearing derive; only the model id is
// shown.
impl std::fmt::Debug for dyn LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmProvider")
            .field("model_id", &self.model_id())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Parse a provider string like `"anthropic/claude-sonnet"` into components.
///
/// Returns `(provider_name, model_name)`.
///
/// # Errors
///
/// Returns an error if the string does not contain exactly one `/` separator.
pub fn parse_provider_string(s: &str) -> anyhow::Result<(&str, &str)> {
    let (provider, model) = s.split_once('/').ok_or_else(|| {
        anyhow::anyhow!("invalid provider string: {s:?}, expected format 'provider/model'")
    })?;
    if provider.is_empty() || model.is_empty() {
        anyhow::bail!("invalid provider string: {s:?}, both provider and model must be non-empty");
    }
    Ok((provider, model))
}

/// Build the provider for a `provider/model` spec.
///
/// # Errors
///
/// Fails when the spec is malformed, names an unknown provider, or
/// required credentials are missing.
pub fn create_provider(
    spec: &str,
    credentials: &Credentials,
) -> anyhow::Result<std::sync::Arc<dyn LlmProvider>> {
    let (provider, model) = parse_provider_string(spec)?;
    match provider {
        "anthropic" => {
            let api_key = credentials.anthropic_api_key().ok_or_else(|| {
                anyhow::anyhow!("no Anthropic API key found, set ANTHROPIC_API_KEY")
            })?;
            Ok(std::sync::Arc::new(anthropic::AnthropicProvider::new(
                spec.to_owned(),
                model.to_owned(),
                api_key,
            )))
        }
        "ollama" => Ok(std::sync::Arc::new(ollama::OllamaProvider::new(
            spec.to_owned(),
            model.to_owned(),
        ))),
        other => anyhow::bail!("unknown provider: {other:?}, expected 'anthropic' or 'ollama'"),
    }
}

/// LLM Client: the single point of entry for every text-completion call.
///
/// ARCHITECTURAL RULE: No other module may talk to a provider over HTTP.
/// The pipeline depends only on the `CompletionProvider` trait so it can run
/// against deterministic stubs in tests.
///
/// The provider credential is supplied per call and is never stored on the
/// client, logged, or read from the environment.
use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// Groq exposes an OpenAI-compatible chat-completions API.
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Upper bound on provider diagnostics carried into error messages.
const MAX_DIAGNOSTIC_CHARS: usize = 300;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    AuthFailure,
    RateLimited,
    Timeout,
    Unavailable,
}

/// A failed outbound completion call. Never retried by this crate.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("The AI provider rejected the API key: {message}")]
    AuthFailure { message: String },

    #[error("The AI provider is rate limiting requests, try again later: {message}")]
    RateLimited { message: String },

    #[error("The AI provider did not respond within {after:?}")]
    Timeout { after: Duration },

    #[error("The AI provider is unavailable: {message}")]
    Unavailable { message: String },
}

impl ProviderError {
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            ProviderError::AuthFailure { .. } => ProviderErrorKind::AuthFailure,
            ProviderError::RateLimited { .. } => ProviderErrorKind::RateLimited,
            ProviderError::Timeout { .. } => ProviderErrorKind::Timeout,
            ProviderError::Unavailable { .. } => ProviderErrorKind::Unavailable,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Call inputs
// ────────────────────────────────────────────────────────────────────────────

/// Opaque per-request API key. `Debug` never prints the value and the type is
/// deliberately not `Serialize`.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderCredential(String);

impl ProviderCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Replaces every occurrence of the secret in `text`.
    pub fn redact(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_string();
        }
        text.replace(&self.0, "[REDACTED]")
    }
}

impl fmt::Debug for ProviderCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProviderCredential(****)")
    }
}

/// The fully assembled instruction text sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    /// Description of the JSON document the model must return. Also embedded in `user`.
    pub output_schema: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    Text,
    /// Provider-side JSON mode. Only a hint; the normalizer still validates.
    #[default]
    JsonObject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 4000,
            temperature: 0.7,
            response_format: ResponseFormat::JsonObject,
        }
    }
}

/// The external text-completion capability.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        prompt: &Prompt,
        credential: &ProviderCredential,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError>;
}

/// Issues exactly one completion call, bounded by `timeout`.
///
/// Dropping the returned future aborts the outbound request.
pub async fn generate(
    provider: &dyn CompletionProvider,
    prompt: &Prompt,
    credential: &ProviderCredential,
    options: &CompletionOptions,
    timeout: Duration,
) -> Result<String, ProviderError> {
    let call = provider.complete(prompt, credential, options);
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(text)) => {
            debug!("Completion succeeded: {} chars", text.len());
            Ok(text)
        }
        Ok(Err(e)) => {
            warn!("Completion failed: {:?}", e.kind());
            Err(e)
        }
        Err(_) => {
            warn!("Completion timed out after {:?}", timeout);
            Err(ProviderError::Timeout { after: timeout })
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible chat-completions client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormatBody>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormatBody {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP implementation of `CompletionProvider`.
/// The reqwest `Client` is cheap to clone and pools connections; it holds no credential.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(
        &self,
        prompt: &Prompt,
        credential: &ProviderCredential,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: match options.response_format {
                ResponseFormat::JsonObject => Some(ResponseFormatBody {
                    format_type: "json_object",
                }),
                ResponseFormat::Text => None,
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(credential.expose())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| transport_error(e, credential))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body, credential));
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            ProviderError::Unavailable {
                message: credential.redact(&format!("unexpected response body: {e}")),
            }
        })?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        // A missing message is left for the normalizer to reject as unparseable.
        Ok(chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

fn transport_error(e: reqwest::Error, credential: &ProviderCredential) -> ProviderError {
    if e.is_timeout() {
        return ProviderError::Timeout {
            after: CONNECT_TIMEOUT,
        };
    }
    ProviderError::Unavailable {
        message: credential.redact(&e.to_string()),
    }
}

/// Maps a non-success HTTP status to a `ProviderError`, carrying the provider's
/// own diagnostic with the credential scrubbed out.
fn status_error(status: StatusCode, body: &str, credential: &ProviderCredential) -> ProviderError {
    let diagnostic = serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    // Redact before truncating so a cut can never leave part of the key behind.
    let diagnostic: String = credential
        .redact(&diagnostic)
        .chars()
        .take(MAX_DIAGNOSTIC_CHARS)
        .collect();
    let message = format!("{} {}", status.as_u16(), diagnostic)
        .trim_end()
        .to_string();

    warn!("LLM API returned {}", status);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthFailure { message },
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited { message },
        _ => ProviderError::Unavailable { message },
    }
}

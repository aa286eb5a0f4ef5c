//! LLM Client — the single point of entry for all chat-completion calls.
//!
//! No other module talks to the model provider directly. Handlers and CLIs
//! depend on the `ChatBackend` trait so the provider can be stubbed in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

pub mod models;
pub mod prompts;

use models::ModelSpec;

const DEFAULT_BACKOFF: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM refused the request: {0}")]
    Refusal(String),

    #[error("LLM output was truncated (finish_reason=length)")]
    Truncated,
}

/// Shape the model is asked to answer in.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    Text,
    JsonObject,
    JsonSchema { name: &'static str, schema: Value },
}

impl ResponseFormat {
    /// Strict JSON schema where the model supports it, JSON mode otherwise.
    pub fn structured(model: &ModelSpec, name: &'static str, schema: Value) -> Self {
        if model.strict_schema {
            ResponseFormat::JsonSchema { name, schema }
        } else {
            ResponseFormat::JsonObject
        }
    }

    fn to_wire(&self) -> Option<Value> {
        match self {
            ResponseFormat::Text => None,
            ResponseFormat::JsonObject => Some(json!({ "type": "json_object" })),
            ResponseFormat::JsonSchema { name, schema } => Some(json!({
                "type": "json_schema",
                "json_schema": {
                    "name": name,
                    "strict": true,
                    "schema": schema,
                }
            })),
        }
    }
}

/// A single-turn chat request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: ModelSpec,
    pub system: Option<String>,
    pub prompt: String,
    pub response_format: ResponseFormat,
}

impl ChatRequest {
    pub fn new(model: ModelSpec, prompt: impl Into<String>) -> Self {
        Self {
            model,
            system: None,
            prompt: prompt.into(),
            response_format: ResponseFormat::Text,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    fn to_body(&self) -> Value {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": self.prompt }));

        let mut body = Map::new();
        body.insert("model".into(), json!(self.model.name));
        body.insert("messages".into(), Value::Array(messages));
        if let Some(temperature) = self.model.temperature {
            body.insert("temperature".into(), json!(temperature));
        }
        if let Some(format) = self.response_format.to_wire() {
            body.insert("response_format".into(), format);
        }
        Value::Object(body)
    }
}

/// Anything that can answer a chat request with the raw message text.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}

/// Calls the backend and deserializes the message text as JSON.
pub async fn complete_json<T: DeserializeOwned>(
    backend: &dyn ChatBackend,
    request: &ChatRequest,
) -> Result<T, LlmError> {
    let text = backend.complete(request).await?;
    serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

impl ChatCompletionResponse {
    fn into_text(self) -> Result<String, LlmError> {
        let choice = self.choices.into_iter().next().ok_or(LlmError::EmptyContent)?;
        if let Some(refusal) = choice.message.refusal {
            return Err(LlmError::Refusal(refusal));
        }
        if choice.finish_reason.as_deref() == Some("length") {
            return Err(LlmError::Truncated);
        }
        choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
/// Retries on 429 (rate limit), 5xx and transport errors with exponential backoff.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
    backoff: Duration,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        base_url: String,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: max_retries.max(1),
            backoff: DEFAULT_BACKOFF,
        })
    }

    /// Overrides the first backoff delay; later attempts double it.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatBackend for LlmClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let body = request.to_body();
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let delay = self.backoff * (1 << (attempt - 1));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(self.endpoint())
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ProviderError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let completion: ChatCompletionResponse = response.json().await?;

            if let Some(usage) = &completion.usage {
                debug!(
                    model = request.model.name,
                    "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens,
                    usage.completion_tokens
                );
            }

            return completion.into_text();
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: self.max_retries,
        }))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

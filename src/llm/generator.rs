//! Core `ReplyGenerator` trait and `OpenAiGenerator` implementation.
//!
//! `OpenAiGenerator` calls any OpenAI-compatible `/v1/chat/completions`
//! endpoint: OpenAI, Groq, Ollama (OpenAI mode), LM Studio, vLLM, etc.
//! All connection details come from [`LlmConfig`]; nothing is hardcoded.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::LlmConfig;
use crate::llm::context::ConversationMessage;
use crate::llm::prompt::PromptBuilder;

// ---------------------------------------------------------------------------
// LlmError
// ---------------------------------------------------------------------------

/// Errors that can occur while generating a reply.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key is configured.
    #[error("language model API key is not configured")]
    NotConfigured,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("LLM request timed out")]
    Timeout,

    /// The provider answered with a non-success status (rate limit, bad key …).
    #[error("LLM API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse LLM response: {0}")]
    Parse(String),

    /// The LLM returned a response with no usable text content.
    #[error("LLM returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ReplyGenerator trait
// ---------------------------------------------------------------------------

/// Async trait for producing a conversational reply.
///
/// Implementors must be `Send + Sync` so they can be shared across request
/// handlers as `Arc<dyn ReplyGenerator>`.
///
/// # Arguments
/// * `user_message`  – The user's new message, in their own language.
/// * `history`       – Previous exchanges; implementors send at most the
///                     last ten.
/// * `system_prompt` – Persona prompt, or `None` for the default.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Whether the provider has the credentials it needs.  Callers skip
    /// [`generate`](Self::generate) entirely when this is `false`.
    fn is_configured(&self) -> bool;

    async fn generate(
        &self,
        user_message: &str,
        history: &[ConversationMessage],
        system_prompt: Option<&str>,
    ) -> Result<String, LlmError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull the first choice's text out of a chat-completions body.
fn extract_reply(response: ChatCompletionResponse) -> Result<String, LlmError> {
    let reply = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(LlmError::EmptyResponse)?
        .trim()
        .to_string();

    if reply.is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(reply)
}

// ---------------------------------------------------------------------------
// OpenAiGenerator
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiGenerator {
    /// Build an `OpenAiGenerator` from server config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; a default client is used if the builder fails.
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[async_trait]
impl ReplyGenerator for OpenAiGenerator {
    fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    async fn generate(
        &self,
        user_message: &str,
        history: &[ConversationMessage],
        system_prompt: Option<&str>,
    ) -> Result<String, LlmError> {
        let key = self.api_key().ok_or(LlmError::NotConfigured)?;
        let messages = PromptBuilder::new(system_prompt).build_messages(user_message, history);

        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let body = serde_json::json!({
            "model":       self.config.model,
            "messages":    messages,
            "max_tokens":  self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        extract_reply(parsed)
    }
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use super::*;

    /// One recorded `generate` call.
    #[derive(Debug, Clone)]
    pub(crate) struct GenerateCall {
        pub user_message: String,
        pub history: Vec<ConversationMessage>,
        pub system_prompt: Option<String>,
    }

    /// Canned reply generator that records its calls.
    pub(crate) struct MockGenerator {
        configured: bool,
        reply: Option<String>,
        calls: Mutex<Vec<GenerateCall>>,
    }

    impl MockGenerator {
        /// Configured, always answers `reply`.
        pub(crate) fn replying(reply: &str) -> Self {
            Self {
                configured: true,
                reply: Some(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Configured, every call fails with a rate-limit error.
        pub(crate) fn failing() -> Self {
            Self {
                configured: true,
                reply: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// No API key.
        pub(crate) fn unconfigured() -> Self {
            Self {
                configured: false,
                reply: Some("should never be produced".into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> Vec<GenerateCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReplyGenerator for MockGenerator {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate(
            &self,
            user_message: &str,
            history: &[ConversationMessage],
            system_prompt: Option<&str>,
        ) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(GenerateCall {
                user_message: user_message.to_string(),
                history: history.to_vec(),
                system_prompt: system_prompt.map(str::to_string),
            });
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(LlmError::Api {
                    status: 429,
                    body: "rate limited".into(),
                }),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

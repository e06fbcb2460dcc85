//! `ChatApi` trait and its reqwest implementation, used by the desktop
//! client to reach `chattr-server`.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ClientSettings;
use crate::conversation::{ConversationReply, ConversationRequest, TranslateRequest, TranslateResponse};
use crate::languages::TargetLanguage;
use crate::server::{ErrorBody, HealthResponse};
use crate::translate::Translation;

// ---------------------------------------------------------------------------
// ApiClientError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("request to chat server timed out")]
    Timeout,

    /// Non-success status; `message` is the server's error body when present.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("failed to parse server response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiClientError::Timeout
        } else {
            ApiClientError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ChatApi trait
// ---------------------------------------------------------------------------

/// Client-side view of the HTTP API.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<Translation, ApiClientError>;

    async fn converse(
        &self,
        request: &ConversationRequest,
    ) -> Result<ConversationReply, ApiClientError>;
}

// ---------------------------------------------------------------------------
// HttpChatApi
// ---------------------------------------------------------------------------

pub struct HttpChatApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatApi {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(&settings.server_url, settings.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`.  Used once at startup to log whether the server is
    /// reachable.
    pub async fn health(&self) -> Result<HealthResponse, ApiClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        read_json(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(ApiClientError::Server {
            status: status.as_u16(),
            message: error_message(&text),
        });
    }

    response
        .json()
        .await
        .map_err(|e| ApiClientError::Parse(e.to_string()))
}

/// The `message` of an error body, or the raw text if it is not one.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<Translation, ApiClientError> {
        let body = TranslateRequest::new(text, target);
        let response: TranslateResponse = self.post("/api/translate", &body).await?;
        Ok(response.result)
    }

    async fn converse(
        &self,
        request: &ConversationRequest,
    ) -> Result<ConversationReply, ApiClientError> {
        self.post("/api/conversation", request).await
    }
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use super::*;

    /// Answers every call from a fixed script and records requests.
    pub(crate) struct MockApi {
        fail: bool,
        fallback: bool,
        pub(crate) translations: Mutex<Vec<(String, TargetLanguage)>>,
        pub(crate) conversations: Mutex<Vec<ConversationRequest>>,
    }

    impl MockApi {
        pub(crate) fn ok() -> Self {
            Self {
                fail: false,
                fallback: false,
                translations: Mutex::new(Vec::new()),
                conversations: Mutex::new(Vec::new()),
            }
        }

        /// Conversation replies come back flagged as fallbacks.
        pub(crate) fn degraded() -> Self {
            Self {
                fallback: true,
                ..Self::ok()
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                fail: true,
                ..Self::ok()
            }
        }

        fn check(&self) -> Result<(), ApiClientError> {
            if self.fail {
                return Err(ApiClientError::Server {
                    status: 500,
                    message: "Translation failed. Please try again.".into(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ChatApi for MockApi {
        async fn translate(
            &self,
            text: &str,
            target: TargetLanguage,
        ) -> Result<Translation, ApiClientError> {
            self.translations
                .lock()
                .unwrap()
                .push((text.to_string(), target));
            self.check()?;
            Ok(Translation {
                text: format!("[{}] {}", target.code(), text),
                detected_source_lang: Some("en".into()),
            })
        }

        async fn converse(
            &self,
            request: &ConversationRequest,
        ) -> Result<ConversationReply, ApiClientError> {
            self.conversations.lock().unwrap().push(request.clone());
            self.check()?;

            let user = request.user_message.clone().unwrap_or_default();
            let lang = request.target_language.clone().unwrap_or_default();
            if self.fallback {
                return Ok(ConversationReply::fallback(format!("[{lang}] {user}")));
            }
            Ok(ConversationReply {
                user_message_translation: format!("[{lang}] {user}"),
                assistant_response: format!("[{lang}] reply to {user}"),
                assistant_response_translation: format!("reply to {user}"),
                fallback: false,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Core `Translator` trait and `DeepLTranslator` implementation.
//!
//! `DeepLTranslator` posts to DeepL's `/v2/translate`.  The key and base URL
//! come from [`TranslatorConfig`]; free-tier keys are routed to
//! `api-free.deepl.com` automatically.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TranslatorConfig;
use crate::languages::TargetLanguage;

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur during translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// No API key is configured.
    #[error("translation API key is not configured")]
    NotConfigured,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// The provider answered with a non-success status.
    #[error("translation API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse translation response: {0}")]
    Parse(String),

    /// The provider returned no translations.
    #[error("translation API returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else {
            TranslateError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

/// A translated text as returned to HTTP callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub text: String,
    /// Source language detected by the provider (lower-case), if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_source_lang: Option<String>,
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// Async trait for translating text into a [`TargetLanguage`].
///
/// The source language is always auto-detected by the provider.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<Translation, TranslateError>;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct DeepLRequest<'a> {
    text: [&'a str; 1],
    target_lang: String,
}

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

fn extract_translation(response: DeepLResponse) -> Result<Translation, TranslateError> {
    let first = response
        .translations
        .into_iter()
        .next()
        .ok_or(TranslateError::EmptyResponse)?;

    Ok(Translation {
        text: first.text,
        detected_source_lang: first
            .detected_source_language
            .map(|l| l.to_ascii_lowercase()),
    })
}

// ---------------------------------------------------------------------------
// DeepLTranslator
// ---------------------------------------------------------------------------

/// Calls the DeepL `/v2/translate` endpoint.
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl DeepLTranslator {
    /// Build a `DeepLTranslator` from server config.
    pub fn from_config(config: &TranslatorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            base_url: config.base_url(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<Translation, TranslateError> {
        let key = self.api_key.as_deref().ok_or(TranslateError::NotConfigured)?;

        let url = format!("{}/v2/translate", self.base_url);
        let body = DeepLRequest {
            text: [text],
            target_lang: target.provider_code(),
        };

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("DeepL-Auth-Key {key}"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: DeepLResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        extract_translation(parsed)
    }
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_deepl_format() {
        let body = DeepLRequest {
            text: ["Hello"],
            target_lang: TargetLanguage::parse("pt-BR").unwrap().provider_code(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "text": ["Hello"], "target_lang": "PT-BR" })
        );
    }

    #[test]
    fn extracts_first_translation() {
        let response: DeepLResponse = serde_json::from_value(serde_json::json!({
            "translations": [
                { "detected_source_language": "EN", "text": "¡Hola, mundo!" }
            ]
        }))
        .unwrap();
        let t = extract_translation(response).unwrap();
        assert_eq!(t.text, "¡Hola, mundo!");
        assert_eq!(t.detected_source_lang.as_deref(), Some("en"));
    }

    #[test]
    fn no_translations_is_an_error() {
        let response: DeepLResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            extract_translation(response),
            Err(TranslateError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn unconfigured_translator_fails_fast() {
        let translator = DeepLTranslator::from_config(&TranslatorConfig::default());
        assert!(!translator.is_configured());
        let err = translator
            .translate("Hello", TargetLanguage::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::NotConfigured));
    }

    #[test]
    fn translation_serialises_camel_case() {
        let t = Translation {
            text: "Hallo".into(),
            detected_source_lang: Some("en".into()),
        };
        assert_eq!(
            serde_json::to_value(&t).unwrap(),
            serde_json::json!({ "text": "Hallo", "detectedSourceLang": "en" })
        );
    }
}

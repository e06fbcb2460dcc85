//! Request and response bodies of the translate and conversation endpoints,
//! shared by the server and the desktop client.
//!
//! Request fields are all optional at the serde level so that a missing field
//! produces the endpoint's own validation message rather than a generic
//! deserialisation error.  [`TranslateRequest::validate`] and
//! [`ConversationRequest::validate`] turn them into typed, checked values.

use serde::{Deserialize, Serialize};

use crate::conversation::error::ServiceError;
use crate::languages::{TargetLanguage, DEFAULT_TARGET_LANGUAGE};
use crate::llm::{ConversationMessage, ConversationWindow};
use crate::persona::{find_persona, Persona};
use crate::translate::Translation;

/// Assistant text returned when no reply could be generated.
pub const FALLBACK_REPLY: &str =
    "I'm unable to generate a conversation response right now. Here's the translation of your message.";

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Translate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Defaults to `"es"` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

/// A translate request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTranslate {
    pub text: String,
    pub target: TargetLanguage,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>, target: TargetLanguage) -> Self {
        Self {
            text: Some(text.into()),
            target_language: Some(target.code().to_string()),
        }
    }

    pub fn validate(self) -> Result<ValidTranslate, ServiceError> {
        let text = non_blank(self.text)
            .ok_or_else(|| ServiceError::Validation("Please send text to translate".into()))?;

        let code = self
            .target_language
            .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());
        let target = TargetLanguage::parse(&code)?;

        Ok(ValidTranslate { text, target })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub result: Translation,
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_history: Option<Vec<ConversationMessage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<String>,
}

/// A conversation request that passed validation.
#[derive(Debug, Clone)]
pub struct ValidConversation {
    pub user_message: String,
    pub target: TargetLanguage,
    /// Already trimmed to the last ten entries.
    pub history: ConversationWindow,
    /// `None` selects the default system prompt.
    pub persona: Option<&'static Persona>,
}

impl ConversationRequest {
    pub fn validate(self) -> Result<ValidConversation, ServiceError> {
        let user_message = non_blank(self.user_message)
            .ok_or_else(|| ServiceError::Validation("userMessage is required".into()))?;

        let code = non_blank(self.target_language)
            .ok_or_else(|| ServiceError::Validation("targetLanguage is required".into()))?;
        let target = TargetLanguage::parse(&code)?;

        let persona = match self.character_id {
            Some(id) => Some(
                find_persona(&id)
                    .ok_or_else(|| ServiceError::Validation(format!("Unknown characterId: {id}")))?,
            ),
            None => None,
        };

        let history = ConversationWindow::from_history(self.conversation_history.unwrap_or_default());

        Ok(ValidConversation {
            user_message,
            target,
            history,
            persona,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationReply {
    /// The user's message in the target language.
    pub user_message_translation: String,
    /// The assistant's reply in the target language.
    pub assistant_response: String,
    /// The assistant's reply in the user's own language.
    pub assistant_response_translation: String,
    /// Set when no reply could be generated and only a translation is given.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl ConversationReply {
    /// Translation-only reply built from the translated user message.
    pub fn fallback(user_message_translation: String) -> Self {
        Self {
            assistant_response: user_message_translation.clone(),
            user_message_translation,
            assistant_response_translation: FALLBACK_REPLY.to_string(),
            fallback: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

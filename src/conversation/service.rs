//! Request orchestration shared by the HTTP handlers.
//!
//! ```text
//! translate(req)
//!   └─▶ validate → translator.translate                    [1 call]
//!
//! converse(req)
//!   └─▶ validate
//!         ├─ model unconfigured → fallback
//!         └─ generator.generate(user, history, persona prompt)
//!               ├─ Err → warn + fallback
//!               └─ Ok(reply) → translate_pair(user, reply)  [1 or 3 calls]
//!
//! fallback
//!   └─▶ translator.translate(user)                          [1 call]
//! ```

use std::sync::Arc;

use crate::llm::ReplyGenerator;
use crate::translate::{translate_pair, Translation, Translator};

use super::error::ServiceError;
use super::types::{ConversationReply, ConversationRequest, TranslateRequest, ValidConversation};

/// Owns the two providers and implements both endpoints' flows.
pub struct ChatService {
    translator: Arc<dyn Translator>,
    generator: Arc<dyn ReplyGenerator>,
}

impl ChatService {
    pub fn new(translator: Arc<dyn Translator>, generator: Arc<dyn ReplyGenerator>) -> Self {
        Self {
            translator,
            generator,
        }
    }

    /// Whether conversation replies can come from the language model at all.
    pub fn generator_configured(&self) -> bool {
        self.generator.is_configured()
    }

    pub async fn translate(&self, request: TranslateRequest) -> Result<Translation, ServiceError> {
        let valid = request.validate()?;

        self.translator
            .translate(&valid.text, valid.target)
            .await
            .map_err(|e| {
                log::error!("translation error: {e}");
                ServiceError::translation(e)
            })
    }

    pub async fn converse(
        &self,
        request: ConversationRequest,
    ) -> Result<ConversationReply, ServiceError> {
        let valid = request.validate()?;

        if !self.generator.is_configured() {
            log::warn!("language model not configured, falling back to translation only");
            return self.fallback(&valid).await;
        }

        let history = valid.history.to_vec();
        let system_prompt = valid.persona.map(|p| p.system_prompt);

        let reply = match self
            .generator
            .generate(&valid.user_message, &history, system_prompt)
            .await
        {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                log::warn!("reply generation failed, falling back to translation only: {e}");
                return self.fallback(&valid).await;
            }
        };

        let pair = translate_pair(
            self.translator.as_ref(),
            &valid.user_message,
            &reply,
            valid.target,
        )
        .await
        .map_err(|e| {
            log::error!("conversation translation error: {e}");
            ServiceError::translation(e)
        })?;

        Ok(ConversationReply {
            user_message_translation: pair.first,
            assistant_response: pair.second,
            assistant_response_translation: reply,
            fallback: false,
        })
    }

    async fn fallback(&self, valid: &ValidConversation) -> Result<ConversationReply, ServiceError> {
        let translated = self
            .translator
            .translate(&valid.user_message, valid.target)
            .await
            .map_err(|e| {
                log::error!("fallback translation error: {e}");
                ServiceError::fallback_translation(e)
            })?;

        Ok(ConversationReply::fallback(translated.text.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

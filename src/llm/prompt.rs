//! Chat-message builder for conversation replies.
//!
//! [`PromptBuilder::build_messages`] produces the message list sent to any
//! OpenAI-compatible `/v1/chat/completions` endpoint:
//!
//! 1. system prompt (persona's, or [`DEFAULT_SYSTEM_PROMPT`])
//! 2. at most [`MAX_CONVERSATION_HISTORY`] history entries, most recent kept
//! 3. the user's new message

use serde::Serialize;

use crate::llm::context::{ConversationMessage, Role, MAX_CONVERSATION_HISTORY};

/// Used when a conversation request names no persona.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a friendly conversation assistant. Your role is to have natural conversations with users who are practicing a new language.

Guidelines:
- Respond in English
- Keep your responses concise and conversational (1-2 sentences)
- Be encouraging and supportive
- Stay contextual to the conversation
- Use appropriate vocabulary for language learners
- Avoid overly complex grammar or idioms unless the user demonstrates advanced proficiency";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl From<Role> for ChatRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => ChatRole::User,
            Role::Assistant => ChatRole::Assistant,
        }
    }
}

/// A single chat-completions message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the chat-completions message list for one reply.
///
/// # Example
/// ```rust
/// use chattr::llm::{ConversationMessage, PromptBuilder};
///
/// let builder = PromptBuilder::new(None);
/// let history = vec![ConversationMessage::user("Hi"), ConversationMessage::assistant("Hello!")];
/// let messages = builder.build_messages("How are you?", &history);
/// assert_eq!(messages.len(), 4);
/// ```
pub struct PromptBuilder {
    system_prompt: String,
}

impl PromptBuilder {
    /// `system_prompt` of `None` selects [`DEFAULT_SYSTEM_PROMPT`].
    pub fn new(system_prompt: Option<&str>) -> Self {
        Self {
            system_prompt: system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT).to_string(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Build `[system, ...last ≤10 history, user]`.
    pub fn build_messages(
        &self,
        user_message: &str,
        history: &[ConversationMessage],
    ) -> Vec<ChatMessage> {
        let start = history.len().saturating_sub(MAX_CONVERSATION_HISTORY);
        let recent = &history[start..];

        let mut messages = Vec::with_capacity(recent.len() + 2);
        messages.push(ChatMessage {
            role: ChatRole::System,
            content: self.system_prompt.clone(),
        });
        messages.extend(recent.iter().map(|m| ChatMessage {
            role: m.role.into(),
            content: m.content.clone(),
        }));
        messages.push(ChatMessage {
            role: ChatRole::User,
            content: user_message.to_string(),
        });
        messages
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Rolling conversation window used as context for reply generation.
//!
//! [`ConversationWindow`] keeps the last [`MAX_CONVERSATION_HISTORY`]
//! user/assistant messages.  Older entries are dropped from the front as new
//! ones arrive, so the window can be handed to the language model as-is.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of history entries sent to the language model.
pub const MAX_CONVERSATION_HISTORY: usize = 10;

// ---------------------------------------------------------------------------
// ConversationMessage
// ---------------------------------------------------------------------------

/// Who authored a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of conversation history, as exchanged over the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ConversationWindow
// ---------------------------------------------------------------------------

/// Bounded sliding window of conversation history.
///
/// # Example
/// ```rust
/// use chattr::llm::{ConversationMessage, ConversationWindow};
///
/// let mut window = ConversationWindow::new();
/// for i in 0..12 {
///     window.push(ConversationMessage::user(format!("message {i}")));
/// }
/// assert_eq!(window.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct ConversationWindow {
    messages: VecDeque<ConversationMessage>,
    max_messages: usize,
}

impl ConversationWindow {
    /// Create an empty window holding at most [`MAX_CONVERSATION_HISTORY`]
    /// entries.
    pub fn new() -> Self {
        Self::with_capacity(MAX_CONVERSATION_HISTORY)
    }

    /// Create an empty window with a custom limit (useful for testing).
    pub fn with_capacity(max_messages: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(max_messages + 2),
            max_messages,
        }
    }

    /// Build a window from caller-supplied history, keeping only the most
    /// recent entries.
    pub fn from_history(history: impl IntoIterator<Item = ConversationMessage>) -> Self {
        let mut window = Self::new();
        window.extend(history);
        window
    }

    /// Append a message, evicting the oldest entries beyond the limit.
    pub fn push(&mut self, message: ConversationMessage) {
        self.messages.push_back(message);

        while self.messages.len() > self.max_messages {
            self.messages.pop_front();
        }
    }

    /// Record one completed exchange: the user's text and the model's reply,
    /// both in the user's own language.
    pub fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.push(ConversationMessage::user(user));
        self.push(ConversationMessage::assistant(assistant));
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = ConversationMessage>) {
        for message in messages {
            self.push(message);
        }
    }

    /// Drop all history (mode switch, explicit clear).
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ConversationMessage> {
        self.messages.iter()
    }

    pub fn to_vec(&self) -> Vec<ConversationMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConversationWindow {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let window = ConversationWindow::new();
        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
        assert!(window.to_vec().is_empty());
    }

    #[test]
    fn rolling_window_caps_at_ten() {
        let mut window = ConversationWindow::new();
        for i in 0..25 {
            window.push(ConversationMessage::user(format!("m{i}")));
        }
        assert_eq!(window.len(), MAX_CONVERSATION_HISTORY);

        let contents: Vec<_> = window.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents.first(), Some(&"m15"));
        assert_eq!(contents.last(), Some(&"m24"));
    }

    #[test]
    fn from_history_keeps_the_most_recent_entries() {
        let history: Vec<_> = (0..13)
            .map(|i| ConversationMessage::assistant(format!("r{i}")))
            .collect();
        let window = ConversationWindow::from_history(history);
        assert_eq!(window.len(), 10);
        assert_eq!(window.iter().next().unwrap().content, "r3");
    }

    #[test]
    fn push_exchange_adds_user_then_assistant() {
        let mut window = ConversationWindow::new();
        window.push_exchange("Hola", "¡Hola! ¿Qué tal?");
        let v = window.to_vec();
        assert_eq!(v[0], ConversationMessage::user("Hola"));
        assert_eq!(v[1], ConversationMessage::assistant("¡Hola! ¿Qué tal?"));
    }

    #[test]
    fn reset_clears_window() {
        let mut window = ConversationWindow::with_capacity(3);
        window.push_exchange("a", "b");
        window.reset();
        assert!(window.is_empty());
    }

    #[test]
    fn roles_serialise_lowercase() {
        let json = serde_json::to_string(&ConversationMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
        assert!(serde_json::from_str::<ConversationMessage>(r#"{"role":"system","content":"x"}"#).is_err());
    }
}

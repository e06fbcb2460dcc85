//! Messages passed between the UI and the submission runner.
//!
//! ```text
//! UI ──Submission──▶ SubmissionRunner ──SessionEvent──▶ ChatSession::apply
//! ```

use crate::config::Mode;
use crate::conversation::ConversationRequest;
use crate::languages::TargetLanguage;
use crate::llm::ConversationMessage;

use super::message::Message;

/// Shown in place of any failure detail.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Everything that changes the session's visible state.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The user's message, applied before the request is sent.
    Outgoing(Message),
    /// A reply arrived.  `exchange` is set only for conversation replies that
    /// came from the language model; it is appended to the history window.
    Incoming {
        message: Message,
        exchange: Option<Exchange>,
    },
    /// A request started (`true`) or finished (`false`).
    Loading(bool),
    /// A request failed; the message is safe to show.
    Failed(String),
    /// Drop conversation history without touching the message list.
    ClearConversation,
}

/// One user/assistant round, both sides in the user's own language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
}

/// A snapshot of what to send, taken when the user submits.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub text: String,
    pub mode: Mode,
    pub target: TargetLanguage,
    pub character_id: String,
    pub history: Vec<ConversationMessage>,
}

impl Submission {
    pub fn conversation_request(&self) -> ConversationRequest {
        ConversationRequest {
            user_message: Some(self.text.clone()),
            target_language: Some(self.target.code().to_string()),
            conversation_history: Some(self.history.clone()),
            character_id: Some(self.character_id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_request_carries_snapshot() {
        let submission = Submission {
            text: "Wie geht's?".into(),
            mode: Mode::Conversation,
            target: TargetLanguage::parse("de").unwrap(),
            character_id: "travel-guide".into(),
            history: vec![ConversationMessage::user("Hallo")],
        };
        let request = submission.conversation_request();
        assert_eq!(request.user_message.as_deref(), Some("Wie geht's?"));
        assert_eq!(request.target_language.as_deref(), Some("de"));
        assert_eq!(request.character_id.as_deref(), Some("travel-guide"));
        assert_eq!(request.conversation_history.unwrap().len(), 1);
    }
}

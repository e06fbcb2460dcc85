//! Client-side chat session: the message list, conversation history and the
//! current selections, all owned in one place and changed only through
//! [`ChatSession::apply`] and the setters below.

use crate::config::{ClientSettings, Mode};
use crate::languages::TargetLanguage;
use crate::llm::ConversationWindow;

use super::events::{SessionEvent, Submission};
use super::message::Message;

pub struct ChatSession {
    settings: ClientSettings,
    messages: Vec<Message>,
    window: ConversationWindow,
    loading: bool,
    error: Option<String>,
}

impl ChatSession {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            settings,
            messages: Message::seeds(),
            window: ConversationWindow::new(),
            loading: false,
            error: None,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn window(&self) -> &ConversationWindow {
        &self.window
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Outgoing(message) => {
                self.error = None;
                self.messages.push(message);
            }
            SessionEvent::Incoming { message, exchange } => {
                self.messages.push(message);
                if let Some(exchange) = exchange {
                    self.window.push_exchange(exchange.user, exchange.assistant);
                }
            }
            SessionEvent::Loading(loading) => self.loading = loading,
            SessionEvent::Failed(message) => self.error = Some(message),
            SessionEvent::ClearConversation => self.window.reset(),
        }
    }

    /// Start a submission: show the user's message immediately and mark the
    /// session busy.  Returns `None` for blank text or while a request is
    /// already in flight.
    pub fn begin_submit(&mut self, text: &str) -> Option<Submission> {
        let text = text.trim();
        if text.is_empty() || self.loading {
            return None;
        }

        let submission = Submission {
            text: text.to_string(),
            mode: self.settings.mode,
            target: self.settings.target_language,
            character_id: self.settings.character_id.clone(),
            history: self.window.to_vec(),
        };

        self.apply(SessionEvent::Outgoing(Message::outgoing(text)));
        self.apply(SessionEvent::Loading(true));
        Some(submission)
    }

    // -----------------------------------------------------------------------
    // Selections
    // -----------------------------------------------------------------------

    /// Switch mode.  Any change resets the message list to the seeds and
    /// drops conversation history.  Returns whether anything changed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.settings.mode == mode {
            return false;
        }
        self.settings.mode = mode;
        self.messages = Message::seeds();
        self.error = None;
        self.apply(SessionEvent::ClearConversation);
        true
    }

    pub fn set_target_language(&mut self, target: TargetLanguage) -> bool {
        if self.settings.target_language == target {
            return false;
        }
        self.settings.target_language = target;
        self.apply(SessionEvent::ClearConversation);
        true
    }

    pub fn set_character(&mut self, id: &str) -> bool {
        if self.settings.character_id == id {
            return false;
        }
        self.settings.character_id = id.to_string();
        self.apply(SessionEvent::ClearConversation);
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

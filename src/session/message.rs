//! Entries of the visible message list.

use chrono::Utc;

/// One chat bubble.  Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub content: String,
    /// Milliseconds since the Unix epoch when the message was created.
    pub timestamp: i64,
    /// `true` for replies, `false` for what the user typed.
    pub incoming: bool,
    /// Shown under the content in conversation mode.
    pub translation: Option<String>,
}

impl Message {
    pub fn outgoing(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
            incoming: false,
            translation: None,
        }
    }

    pub fn incoming(content: impl Into<String>, translation: Option<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
            incoming: true,
            translation,
        }
    }

    /// The two placeholder messages shown on start and after a mode switch.
    pub fn seeds() -> Vec<Message> {
        vec![
            Message {
                content: "Message in English here.".into(),
                timestamp: 1,
                incoming: false,
                translation: None,
            },
            Message {
                content: "And you'll get a response here.".into(),
                timestamp: 2,
                incoming: true,
                translation: None,
            },
        ]
    }

    /// Local time of day, for display.
    pub fn time_label(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
            .map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string())
            .unwrap_or_default()
    }
}

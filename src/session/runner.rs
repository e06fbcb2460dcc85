//! Submission runner: performs the HTTP round trip for each [`Submission`]
//! and reports back as [`SessionEvent`]s.
//!
//! ```text
//! Submission (mpsc)
//!   ├─ Translation  → api.translate   → Incoming(translated text)
//!   └─ Conversation → api.converse    → Incoming(reply, translation)
//!                                        + exchange unless fallback
//!   any error → Failed(GENERIC_ERROR)
//!   always    → Loading(false)
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{ApiClientError, ChatApi};
use crate::config::Mode;

use super::events::{Exchange, SessionEvent, Submission, GENERIC_ERROR};
use super::message::Message;

/// Runs submissions one at a time.
///
/// Create with [`SubmissionRunner::new`], then call [`run`](Self::run)
/// inside a tokio task.
pub struct SubmissionRunner {
    api: Arc<dyn ChatApi>,
    events: mpsc::UnboundedSender<SessionEvent>,
    /// Called after each batch of events so the UI can redraw.
    notify: Box<dyn Fn() + Send + Sync>,
}

impl SubmissionRunner {
    pub fn new(api: Arc<dyn ChatApi>, events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self {
            api,
            events,
            notify: Box::new(|| {}),
        }
    }

    pub fn with_notify(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notify = Box::new(notify);
        self
    }

    /// Run until `submissions` is closed.
    pub async fn run(self, mut submissions: mpsc::Receiver<Submission>) {
        while let Some(submission) = submissions.recv().await {
            self.handle(submission).await;
        }

        log::info!("session: submission channel closed, runner shutting down");
    }

    async fn handle(&self, submission: Submission) {
        log::debug!(
            "session: {} submission to {}",
            submission.mode.label(),
            submission.target
        );

        match self.request(&submission).await {
            Ok(event) => self.emit(event),
            Err(e) => {
                log::error!("session: request failed: {e}");
                self.emit(SessionEvent::Failed(GENERIC_ERROR.to_string()));
            }
        }

        self.emit(SessionEvent::Loading(false));
        (self.notify)();
    }

    async fn request(&self, submission: &Submission) -> Result<SessionEvent, ApiClientError> {
        match submission.mode {
            Mode::Translation => {
                let translation = self.api.translate(&submission.text, submission.target).await?;
                Ok(SessionEvent::Incoming {
                    message: Message::incoming(translation.text, None),
                    exchange: None,
                })
            }
            Mode::Conversation => {
                let reply = self.api.converse(&submission.conversation_request()).await?;
                if reply.fallback {
                    log::warn!("session: conversation degraded to translation only");
                }

                let exchange = (!reply.fallback).then(|| Exchange {
                    user: submission.text.clone(),
                    assistant: reply.assistant_response_translation.clone(),
                });

                Ok(SessionEvent::Incoming {
                    message: Message::incoming(
                        reply.assistant_response,
                        Some(reply.assistant_response_translation),
                    ),
                    exchange,
                })
            }
        }
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            log::debug!("session: event receiver dropped");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::api::client::mock::MockApi;
    use crate::config::ClientSettings;
    use crate::conversation::FALLBACK_REPLY;
    use crate::session::ChatSession;

    /// Submit `texts` through a session in `mode` and drain every event the
    /// runner produced back into it.
    async fn run_session(api: Arc<MockApi>, mode: Mode, texts: &[&str]) -> ChatSession {
        let mut session = ChatSession::new(ClientSettings {
            mode,
            ..ClientSettings::default()
        });

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let runner = SubmissionRunner::new(api, event_tx);

        for text in texts {
            let (tx, rx) = mpsc::channel(4);
            let submission = session.begin_submit(text).unwrap();
            tx.send(submission).await.unwrap();
            drop(tx);

            runner_once(&runner, rx).await;
            while let Ok(event) = event_rx.try_recv() {
                session.apply(event);
            }
        }
        session
    }

    async fn runner_once(runner: &SubmissionRunner, mut rx: mpsc::Receiver<Submission>) {
        while let Some(submission) = rx.recv().await {
            runner.handle(submission).await;
        }
    }

    #[tokio::test]
    async fn translation_reply_is_shown_without_history() {
        let api = Arc::new(MockApi::ok());
        let session = run_session(api.clone(), Mode::Translation, &["Hello"]).await;

        let last = session.messages().last().unwrap();
        assert!(last.incoming);
        assert_eq!(last.content, "[es] Hello");
        assert!(!session.is_loading());
        assert!(session.window().is_empty());
        assert_eq!(api.translations.lock().unwrap().len(), 1);
        assert!(api.conversations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn conversation_reply_extends_history() {
        let api = Arc::new(MockApi::ok());
        let session = run_session(api.clone(), Mode::Conversation, &["Hi", "How are you?"]).await;

        let last = session.messages().last().unwrap();
        assert_eq!(last.content, "[es] reply to How are you?");
        assert_eq!(last.translation.as_deref(), Some("reply to How are you?"));

        let history = session.window().to_vec();
        assert_eq!(history.len(), 4);
        assert_eq!(history[3].content, "reply to How are you?");

        // The second request carried the first exchange.
        let requests = api.conversations.lock().unwrap();
        assert_eq!(requests[1].conversation_history.as_ref().unwrap().len(), 2);
        assert_eq!(requests[1].character_id.as_deref(), Some("friendly-tutor"));
    }

    #[tokio::test]
    async fn fallback_reply_never_enters_history() {
        let api = Arc::new(MockApi::degraded());
        let session = run_session(api, Mode::Conversation, &["Hi", "Still there?"]).await;

        let last = session.messages().last().unwrap();
        assert_eq!(last.translation.as_deref(), Some(FALLBACK_REPLY));
        assert!(session.window().is_empty());
    }

    #[tokio::test]
    async fn failure_shows_generic_message_and_clears_loading() {
        let api = Arc::new(MockApi::failing());
        let session = run_session(api, Mode::Conversation, &["Hi"]).await;

        assert_eq!(session.error(), Some(GENERIC_ERROR));
        assert!(!session.is_loading());
        // Only the optimistic outgoing message was added.
        assert_eq!(session.messages().len(), 3);
        assert!(!session.messages()[2].incoming);
    }

    #[tokio::test]
    async fn run_returns_when_channel_closes_and_notifies() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let runner = SubmissionRunner::new(Arc::new(MockApi::ok()), event_tx)
            .with_notify(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        let mut session = ChatSession::new(ClientSettings::default());
        let (tx, rx) = mpsc::channel(4);
        tx.send(session.begin_submit("one").unwrap()).await.unwrap();
        drop(tx);

        runner.run(rx).await;

        let mut events = Vec::new();
        while let Ok(event) = event_rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SessionEvent::Incoming { .. }));
        assert_eq!(events[1], SessionEvent::Loading(false));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

//! Language-model side of conversation mode.
//!
//! This module provides:
//! * [`ReplyGenerator`]: async trait implemented by all reply backends.
//! * [`OpenAiGenerator`]: OpenAI-compatible REST API backend.
//! * [`PromptBuilder`]: builds the chat-completions message list.
//! * [`ConversationWindow`]: bounded window of previous exchanges.
//! * [`LlmError`]: error variants for reply generation.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use chattr::config::LlmConfig;
//! use chattr::llm::{ConversationWindow, OpenAiGenerator, ReplyGenerator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let generator = OpenAiGenerator::from_config(&LlmConfig::default());
//!     let mut window = ConversationWindow::new();
//!
//!     let user = "Hello! How was your weekend?";
//!     let reply = generator
//!         .generate(user, &window.to_vec(), None)
//!         .await
//!         .unwrap();
//!
//!     window.push_exchange(user, reply.clone());
//!     println!("{}", reply);
//! }
//! ```

pub mod context;
pub mod generator;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use context::{ConversationMessage, ConversationWindow, Role, MAX_CONVERSATION_HISTORY};
pub use generator::{LlmError, OpenAiGenerator, ReplyGenerator};
pub use prompt::{ChatMessage, ChatRole, PromptBuilder, DEFAULT_SYSTEM_PROMPT};

//! Desktop client session model.
//!
//! # Architecture
//!
//! ```text
//! egui update()
//!   ├─ ChatSession::begin_submit ──Submission (mpsc)──▶ SubmissionRunner::run()
//!   │                                                        │ ChatApi (HTTP)
//!   └─ ChatSession::apply ◀──────SessionEvent (mpsc)─────────┘
//! ```
//!
//! The session is owned by the UI thread; the runner never touches it
//! directly.

pub mod events;
pub mod message;
pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use events::{Exchange, SessionEvent, Submission, GENERIC_ERROR};
pub use message::Message;
pub use runner::SubmissionRunner;
pub use state::ChatSession;

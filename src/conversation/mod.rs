//! Translation and conversation flows, independent of transport.
//!
//! * [`ChatService`]: validates requests and drives the providers.
//! * [`TranslateRequest`] / [`ConversationRequest`]: JSON request bodies.
//! * [`ConversationReply`]: JSON body of a conversation reply.
//! * [`ServiceError`]: validation vs. downstream failure.

pub mod error;
pub mod service;
pub mod types;

pub use error::ServiceError;
pub use service::ChatService;
pub use types::{
    ConversationReply, ConversationRequest, TranslateRequest, TranslateResponse, FALLBACK_REPLY,
};

//! HTTP client for the chat server.

pub mod client;

pub use client::{ApiClientError, ChatApi, HttpChatApi};

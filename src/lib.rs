//! Chattr: a language-learning chat application.
//!
//! * [`server`]: axum HTTP API (`chattr-server` binary).
//! * [`conversation`]: translate / converse flows behind the API.
//! * [`translate`], [`llm`]: provider clients (DeepL, OpenAI-compatible).
//! * [`session`], [`api`], [`app`]: the desktop client (`chattr` binary).
//! * [`languages`], [`persona`], [`config`]: catalogs and settings.

pub mod api;
pub mod app;
pub mod config;
pub mod conversation;
pub mod languages;
pub mod llm;
pub mod persona;
pub mod server;
pub mod session;
pub mod translate;

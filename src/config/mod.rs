//! Configuration for Chattr.
//!
//! * [`ClientSettings`]: desktop client settings persisted as TOML
//!   (`ClientSettings::load_from` / `ClientSettings::save_to`).
//! * [`ServerConfig`]: HTTP server and provider settings read from the
//!   environment.
//! * [`AppPaths`]: cross-platform config directory.

pub mod paths;
pub mod server;
pub mod settings;

pub use paths::AppPaths;
pub use server::{LlmConfig, ServerConfig, TranslatorConfig};
pub use settings::{ClientSettings, Mode};

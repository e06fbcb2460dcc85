//! Desktop client settings, defaults and TOML persistence.
//!
//! Each setting lives under its own key in `settings.toml`.  Loading is
//! lenient per key: a stored language code that is no longer supported, or a
//! persona id that no longer exists, falls back to its default without
//! discarding the other keys.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::languages::TargetLanguage;
use crate::persona::{find_persona, DEFAULT_PERSONA_ID};

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Interaction mode of the chat window.
///
/// | Variant      | Submission                                       |
/// |--------------|--------------------------------------------------|
/// | Translation  | text → translator → reply                        |
/// | Conversation | text → language model → translator (both sides)  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Translation,
    Conversation,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Translation => "Translation",
            Mode::Conversation => "Conversation",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "translation" => Some(Mode::Translation),
            "conversation" => Some(Mode::Conversation),
            _ => None,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Translation
    }
}

// ---------------------------------------------------------------------------
// ClientSettings
// ---------------------------------------------------------------------------

/// Settings of the desktop client, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use chattr::config::{AppPaths, ClientSettings};
///
/// let path = AppPaths::new().settings_file;
/// // Load (returns Default when the file is missing)
/// let settings = ClientSettings::load_from(&path).unwrap();
/// settings.save_to(&path).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientSettings {
    /// Base URL of the Chattr HTTP server.
    pub server_url: String,
    /// Language that output is translated into.
    pub target_language: TargetLanguage,
    /// Translation or conversation.
    pub mode: Mode,
    /// Id of the selected conversation persona.
    pub character_id: String,
    /// Seconds to wait for the server before giving up on a submission.
    pub timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3000".into(),
            target_language: TargetLanguage::default(),
            mode: Mode::default(),
            character_id: DEFAULT_PERSONA_ID.into(),
            timeout_secs: 60,
        }
    }
}

impl ClientSettings {
    /// Load from `path`.
    ///
    /// Returns `Ok(ClientSettings::default())` when the file does not exist
    /// yet.  Only unreadable files or broken TOML are errors; a key with a
    /// wrong type or an unsupported value keeps its default.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let table: toml::Table = content.parse()?;
        Ok(Self::from_table(&table))
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn from_table(table: &toml::Table) -> Self {
        let mut settings = Self::default();

        if let Some(url) = string_key(table, "server_url").filter(|u| !u.trim().is_empty()) {
            settings.server_url = url.trim_end_matches('/').to_string();
        }

        if let Some(code) = string_key(table, "target_language") {
            match TargetLanguage::parse(code) {
                Ok(lang) => settings.target_language = lang,
                Err(e) => log::warn!("settings: {e}; using {}", settings.target_language),
            }
        }

        if let Some(mode) = string_key(table, "mode") {
            match Mode::parse(mode) {
                Some(mode) => settings.mode = mode,
                None => log::warn!("settings: unknown mode {mode:?}; using translation"),
            }
        }

        if let Some(id) = string_key(table, "character_id") {
            if find_persona(id).is_some() {
                settings.character_id = id.to_string();
            } else {
                log::warn!("settings: unknown character {id:?}; using {DEFAULT_PERSONA_ID}");
            }
        }

        match table.get("timeout_secs") {
            None => {}
            Some(toml::Value::Integer(secs)) if *secs > 0 => settings.timeout_secs = *secs as u64,
            Some(other) => log::warn!(
                "settings: invalid timeout_secs {other}; using {}",
                settings.timeout_secs
            ),
        }

        settings
    }
}

/// String value of `key`, or `None` (with a warning) when it has another type.
fn string_key<'a>(table: &'a toml::Table, key: &str) -> Option<&'a str> {
    match table.get(key)? {
        toml::Value::String(value) => Some(value),
        other => {
            log::warn!("settings: {key} should be a string, found {other}; using default");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let settings = ClientSettings::load_from(&path).expect("should not error");
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn default_values() {
        let s = ClientSettings::default();
        assert_eq!(s.target_language.code(), "es");
        assert_eq!(s.mode, Mode::Translation);
        assert_eq!(s.character_id, "friendly-tutor");
        assert_eq!(s.server_url, "http://127.0.0.1:3000");
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.toml");

        let mut s = ClientSettings::default();
        s.target_language = TargetLanguage::parse("pt-BR").unwrap();
        s.mode = Mode::Conversation;
        s.character_id = "wise-mentor".into();
        s.server_url = "http://10.0.0.2:8080".into();
        s.timeout_secs = 15;

        s.save_to(&path).expect("save");
        let loaded = ClientSettings::load_from(&path).expect("load");
        assert_eq!(loaded, s);
    }

    #[test]
    fn keys_are_stored_separately() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        ClientSettings::default().save_to(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("target_language = \"es\""), "{raw}");
        assert!(raw.contains("mode = \"translation\""), "{raw}");
        assert!(raw.contains("character_id = \"friendly-tutor\""), "{raw}");
    }

    #[test]
    fn invalid_values_fall_back_per_key() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "target_language = \"xx\"\nmode = \"karaoke\"\ncharacter_id = \"pirate\"\nserver_url = \"http://example.test/\"\n",
        )
        .unwrap();

        let s = ClientSettings::load_from(&path).unwrap();
        assert_eq!(s.target_language.code(), "es");
        assert_eq!(s.mode, Mode::Translation);
        assert_eq!(s.character_id, "friendly-tutor");
        // Valid keys survive alongside the invalid ones.
        assert_eq!(s.server_url, "http://example.test");
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "mode = \"conversation\"\n").unwrap();

        let s = ClientSettings::load_from(&path).unwrap();
        assert_eq!(s.mode, Mode::Conversation);
        assert_eq!(s.target_language.code(), "es");
    }

    #[test]
    fn mistyped_key_does_not_discard_the_others() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "mode = \"conversation\"\ntarget_language = \"fr\"\ntimeout_secs = \"soon\"\ncharacter_id = 7\n",
        )
        .unwrap();

        let s = ClientSettings::load_from(&path).expect("mistyped keys are not fatal");
        assert_eq!(s.mode, Mode::Conversation);
        assert_eq!(s.target_language.code(), "fr");
        assert_eq!(s.timeout_secs, 60);
        assert_eq!(s.character_id, "friendly-tutor");
    }

    #[test]
    fn broken_toml_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "mode = \"conversation\n").unwrap();

        assert!(ClientSettings::load_from(&path).is_err());
    }
}

//! Supported target languages.
//!
//! [`TargetLanguage`] can only be obtained through [`TargetLanguage::parse`]
//! (or serde, which goes through the same check), so holding one is proof
//! that the code is in [`SUPPORTED_LANGUAGES`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A selectable target language.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOption {
    /// Language code as accepted by the HTTP API (e.g. `"pt-BR"`).
    pub code: &'static str,
    /// English display name.
    pub name: &'static str,
    /// Name of the language in the language itself.
    pub native_name: &'static str,
}

const fn lang(code: &'static str, name: &'static str, native_name: &'static str) -> LanguageOption {
    LanguageOption {
        code,
        name,
        native_name,
    }
}

/// Every target language the translation provider accepts, sorted by code.
pub static SUPPORTED_LANGUAGES: &[LanguageOption] = &[
    lang("bg", "Bulgarian", "Български"),
    lang("cs", "Czech", "Čeština"),
    lang("da", "Danish", "Dansk"),
    lang("de", "German", "Deutsch"),
    lang("el", "Greek", "Ελληνικά"),
    lang("en-GB", "English (British)", "English (UK)"),
    lang("en-US", "English (American)", "English (US)"),
    lang("es", "Spanish", "Español"),
    lang("et", "Estonian", "Eesti"),
    lang("fi", "Finnish", "Suomi"),
    lang("fr", "French", "Français"),
    lang("hu", "Hungarian", "Magyar"),
    lang("id", "Indonesian", "Bahasa Indonesia"),
    lang("it", "Italian", "Italiano"),
    lang("ja", "Japanese", "日本語"),
    lang("ko", "Korean", "한국어"),
    lang("lt", "Lithuanian", "Lietuvių"),
    lang("lv", "Latvian", "Latviešu"),
    lang("nb", "Norwegian (Bokmål)", "Norsk bokmål"),
    lang("nl", "Dutch", "Nederlands"),
    lang("pl", "Polish", "Polski"),
    lang("pt-BR", "Portuguese (Brazilian)", "Português (Brasil)"),
    lang("pt-PT", "Portuguese (European)", "Português (Portugal)"),
    lang("ro", "Romanian", "Română"),
    lang("ru", "Russian", "Русский"),
    lang("sk", "Slovak", "Slovenčina"),
    lang("sl", "Slovenian", "Slovenščina"),
    lang("sv", "Swedish", "Svenska"),
    lang("tr", "Turkish", "Türkçe"),
    lang("uk", "Ukrainian", "Українська"),
    lang("zh", "Chinese", "中文"),
];

/// Code used when a request or the settings file does not name a language.
pub const DEFAULT_TARGET_LANGUAGE: &str = "es";

// ---------------------------------------------------------------------------
// InvalidLanguage
// ---------------------------------------------------------------------------

/// Returned when a code is not in [`SUPPORTED_LANGUAGES`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid target language: {0}. Please provide a valid language code.")]
pub struct InvalidLanguage(pub String);

// ---------------------------------------------------------------------------
// TargetLanguage
// ---------------------------------------------------------------------------

/// A validated target language code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetLanguage {
    option: &'static LanguageOption,
}

impl TargetLanguage {
    /// Look `code` up in the catalog. Matching is exact (`"pt-BR"`, not
    /// `"pt-br"`), as the HTTP API has always required.
    pub fn parse(code: &str) -> Result<Self, InvalidLanguage> {
        SUPPORTED_LANGUAGES
            .iter()
            .find(|l| l.code == code)
            .map(|option| Self { option })
            .ok_or_else(|| InvalidLanguage(code.to_string()))
    }

    /// Iterate over every supported language.
    pub fn all() -> impl Iterator<Item = TargetLanguage> {
        SUPPORTED_LANGUAGES.iter().map(|option| Self { option })
    }

    pub fn code(&self) -> &'static str {
        self.option.code
    }

    pub fn name(&self) -> &'static str {
        self.option.name
    }

    pub fn native_name(&self) -> &'static str {
        self.option.native_name
    }

    /// Upper-case form sent as DeepL's `target_lang` (e.g. `"EN-GB"`).
    pub fn provider_code(&self) -> String {
        self.option.code.to_ascii_uppercase()
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        // The default code is a catalog member; the test below pins that.
        Self::parse(DEFAULT_TARGET_LANGUAGE).unwrap_or(Self {
            option: &SUPPORTED_LANGUAGES[0],
        })
    }
}

impl fmt::Debug for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TargetLanguage").field(&self.code()).finish()
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for TargetLanguage {
    type Error = InvalidLanguage;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TargetLanguage> for String {
    fn from(lang: TargetLanguage) -> Self {
        lang.code().to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

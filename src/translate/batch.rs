//! Two-text translation in a single provider call.
//!
//! Conversation mode needs both the user's message and the model's reply in
//! the target language.  [`translate_pair`] joins them with
//! [`BATCH_DELIMITER`], translates once, and splits the result.  Providers
//! occasionally translate or reflow the delimiter; when the split does not
//! yield exactly two parts the texts are translated one at a time instead.

use crate::languages::TargetLanguage;
use crate::translate::client::{TranslateError, Translator};

/// Separator placed between the two texts of a batched translation.
pub const BATCH_DELIMITER: &str = "\n|||DEEPL_DELIMITER|||\n";

/// Result of [`translate_pair`], trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPair {
    pub first: String,
    pub second: String,
    /// `false` when the delimiter was lost and two separate calls were made.
    pub batched: bool,
}

/// Translate `first` and `second` into `target`, using one call when the
/// delimiter survives and three calls when it does not.
pub async fn translate_pair(
    translator: &dyn Translator,
    first: &str,
    second: &str,
    target: TargetLanguage,
) -> Result<TranslatedPair, TranslateError> {
    let combined = format!("{first}{BATCH_DELIMITER}{second}");
    let translated = translator.translate(&combined, target).await?;

    let parts: Vec<&str> = translated.text.split(BATCH_DELIMITER).collect();
    if let [a, b] = parts.as_slice() {
        return Ok(TranslatedPair {
            first: a.trim().to_string(),
            second: b.trim().to_string(),
            batched: true,
        });
    }

    log::warn!(
        "batch translation split into {} parts; translating separately",
        parts.len()
    );

    let a = translator.translate(first, target).await?;
    let b = translator.translate(second, target).await?;

    Ok(TranslatedPair {
        first: a.text.trim().to_string(),
        second: b.text.trim().to_string(),
        batched: false,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

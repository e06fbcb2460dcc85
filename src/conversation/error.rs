use thiserror::Error;

use crate::languages::InvalidLanguage;
use crate::translate::TranslateError;

/// Errors surfaced by [`ChatService`](super::ChatService).
///
/// Language-model failures never appear here: they degrade the reply to a
/// translation-only fallback instead.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was rejected before any provider was called.
    #[error("{0}")]
    Validation(String),

    /// The translation provider failed.  `fallback` is set when the failure
    /// happened while building a translation-only fallback reply.
    #[error("translation failed: {source}")]
    Translation {
        #[source]
        source: TranslateError,
        fallback: bool,
    },
}

impl ServiceError {
    pub fn translation(source: TranslateError) -> Self {
        Self::Translation {
            source,
            fallback: false,
        }
    }

    pub fn fallback_translation(source: TranslateError) -> Self {
        Self::Translation {
            source,
            fallback: true,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<InvalidLanguage> for ServiceError {
    fn from(e: InvalidLanguage) -> Self {
        Self::Validation(e.to_string())
    }
}

//! Translation provider access.
//!
//! * [`Translator`]: async trait implemented by translation backends.
//! * [`DeepLTranslator`]: DeepL REST API backend.
//! * [`translate_pair`]: translates two texts with one batched call,
//!   retrying independently when the batch delimiter does not survive.
//! * [`TranslateError`]: error variants for translation.

pub mod batch;
pub mod client;

pub use batch::{translate_pair, TranslatedPair, BATCH_DELIMITER};
pub use client::{DeepLTranslator, TranslateError, Translation, Translator};

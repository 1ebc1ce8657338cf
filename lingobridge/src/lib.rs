//! Shared data for the lingobridge translator.
//!
//! The client controller, the proxy endpoint and the upstream providers all
//! speak in the types defined here: the fixed [`LanguageCode`] table, the
//! [`TranslationRequest`] / [`TranslationResult`] pair, and the JSON shapes in
//! [`wire`].

pub mod language;
pub mod types;
pub mod wire;

pub use language::{AUTO, LanguageCode, LanguageEntry, UnknownLanguage, language_table};
pub use types::{TranslationRequest, TranslationResult, is_eligible};
pub use wire::{ErrorBody, TranslateBody, TranslateResponse};

use crate::language::LanguageCode;

/// Returns true when `text` and `target` would make a sendable request.
///
/// Text must contain something other than whitespace and the target cannot be
/// the `auto` sentinel.
pub fn is_eligible(text: &str, target: LanguageCode) -> bool {
    !text.trim().is_empty() && !target.is_auto()
}

/// A single translation the client wants performed.
///
/// Only constructible through [`TranslationRequest::new`], so holding one means
/// it passed [`is_eligible`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    source_text: String,
    source_language: LanguageCode,
    target_language: LanguageCode,
}

impl TranslationRequest {
    pub fn new(
        source_text: impl Into<String>,
        source_language: LanguageCode,
        target_language: LanguageCode,
    ) -> Option<Self> {
        let source_text = source_text.into();
        if !is_eligible(&source_text, target_language) {
            return None;
        }
        Some(Self {
            source_text,
            source_language,
            target_language,
        })
    }

    /// The text exactly as typed. It is not trimmed before sending.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn source_language(&self) -> LanguageCode {
        self.source_language
    }

    pub fn target_language(&self) -> LanguageCode {
        self.target_language
    }
}

/// The outcome of a successful translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub translated_text: String,
    pub provider_name: String,
    /// Language the provider detected, when it reports one.
    pub detected_source_language: Option<String>,
}

//! Machine Translation trait and utilities
//!
//! This module defines the `MachineTranslator` trait for provider abstraction,
//! so the proxy can forward to MyMemory in production and to a mock in tests
//! without knowing which one it holds.
//!
//! # Example
//!
//! ```ignore
//! use lingobridge_mt::{MachineTranslator, MyMemoryProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = MyMemoryProvider::from_env()?;
//!
//!     // `None` lets the upstream detect the source language
//!     let result = provider.translate("Hello, world!", None, "fr").await?;
//!     println!("{}", result.text); // "Bonjour le monde!"
//!
//!     Ok(())
//! }
//! ```

use crate::error::{MtError, MtResult};
use async_trait::async_trait;
use lingobridge::AUTO;

/// Text returned by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Translated text, exactly as the provider returned it
    pub text: String,
    /// Source language the provider detected, if it reports one
    pub detected_source: Option<String>,
}

impl Translation {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detected_source: None,
        }
    }
}

/// Generic trait for machine translation providers
///
/// Implementations make exactly one upstream attempt per call, with no retry
/// and no caching.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate `text` into `target_locale`
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate, forwarded unchanged
    /// * `source_locale` - Source language code, `None` to auto-detect
    /// * `target_locale` - Target language code (e.g., "fr", "zh-CN")
    ///
    /// # Returns
    ///
    /// * `Ok(Translation)` - The translated text
    /// * `Err(MtError)` - If translation fails
    async fn translate(
        &self,
        text: &str,
        source_locale: Option<&str>,
        target_locale: &str,
    ) -> MtResult<Translation>;

    /// Short identifier reported to clients as `provider`, e.g. "mymemory"
    fn provider_name(&self) -> &str;
}

/// Reduce a client-supplied source code to what the upstream should see
///
/// Absent, empty and `auto` all mean "detect"; anything else is passed through
/// unchanged since the supported codes already match the upstream's.
///
/// ```ignore
/// assert_eq!(source_for_upstream(Some("auto")), None);
/// assert_eq!(source_for_upstream(Some("en")), Some("en"));
/// ```
pub fn source_for_upstream(source: Option<&str>) -> Option<&str> {
    source.filter(|code| !code.is_empty() && *code != AUTO)
}

/// The `source|target` language pair, with `auto` standing in for a missing source
pub fn language_pair(source_locale: Option<&str>, target_locale: &str) -> String {
    format!(
        "{}|{}",
        source_for_upstream(source_locale).unwrap_or(AUTO),
        target_locale
    )
}

/// Reject a language code that cannot travel inside `langpair`
///
/// Codes are limited to ASCII letters, digits, `-` and `_`. A `|` would split
/// the pair, and `&`, `=`, `#` or whitespace would bleed into the rest of the
/// query.
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("empty language code".to_string()));
    }

    match locale
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
    {
        Some(c) => Err(MtError::InvalidLocale(format!(
            "{:?} not allowed in language code {:?}",
            c, locale
        ))),
        None => Ok(()),
    }
}

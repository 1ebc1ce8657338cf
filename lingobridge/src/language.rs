//! The fixed table of languages a user can pick from.
//!
//! Every language the front end offers is a variant of [`LanguageCode`]. The
//! table is static data: it is never extended at runtime, and parsing a code
//! outside of it fails with [`UnknownLanguage`] so that arbitrary strings never
//! reach the proxy from the UI.
//!
//! ```
//! use lingobridge::LanguageCode;
//!
//! let code: LanguageCode = "zh-CN".parse().unwrap();
//! assert_eq!(code.label(), "Chinese (Simplified)");
//! assert!("xx".parse::<LanguageCode>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentinel code asking the upstream provider to detect the source language.
pub const AUTO: &str = "auto";

/// A language the translator supports, plus the `auto` detection sentinel.
///
/// `Auto` is only meaningful as a source language. It is representable as a
/// target so a UI can hold it, but such a selection is never eligible for
/// translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "zh-CN")]
    ChineseSimplified,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "hi")]
    Hindi,
}

impl LanguageCode {
    /// All entries in display order, `Auto` first.
    pub const ALL: [LanguageCode; 13] = [
        LanguageCode::Auto,
        LanguageCode::English,
        LanguageCode::Spanish,
        LanguageCode::French,
        LanguageCode::German,
        LanguageCode::Italian,
        LanguageCode::Portuguese,
        LanguageCode::Russian,
        LanguageCode::ChineseSimplified,
        LanguageCode::Japanese,
        LanguageCode::Korean,
        LanguageCode::Arabic,
        LanguageCode::Hindi,
    ];

    /// The code as sent over the wire and to the upstream provider.
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::Auto => AUTO,
            LanguageCode::English => "en",
            LanguageCode::Spanish => "es",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Italian => "it",
            LanguageCode::Portuguese => "pt",
            LanguageCode::Russian => "ru",
            LanguageCode::ChineseSimplified => "zh-CN",
            LanguageCode::Japanese => "ja",
            LanguageCode::Korean => "ko",
            LanguageCode::Arabic => "ar",
            LanguageCode::Hindi => "hi",
        }
    }

    /// Human readable name shown next to the code.
    pub fn label(self) -> &'static str {
        match self {
            LanguageCode::Auto => "Detect language",
            LanguageCode::English => "English",
            LanguageCode::Spanish => "Spanish",
            LanguageCode::French => "French",
            LanguageCode::German => "German",
            LanguageCode::Italian => "Italian",
            LanguageCode::Portuguese => "Portuguese",
            LanguageCode::Russian => "Russian",
            LanguageCode::ChineseSimplified => "Chinese (Simplified)",
            LanguageCode::Japanese => "Japanese",
            LanguageCode::Korean => "Korean",
            LanguageCode::Arabic => "Arabic",
            LanguageCode::Hindi => "Hindi",
        }
    }

    pub fn is_auto(self) -> bool {
        self == LanguageCode::Auto
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a code is not part of the supported table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for LanguageCode {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// A row of the language table, as served to front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub code: LanguageCode,
    pub label: String,
}

/// The language table in display order.
pub fn language_table() -> Vec<LanguageEntry> {
    LanguageCode::ALL
        .into_iter()
        .map(|code| LanguageEntry {
            code,
            label: code.label().to_string(),
        })
        .collect()
}

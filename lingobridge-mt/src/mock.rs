//! Mock Machine Translator for testing
//!
//! This module provides a deterministic, network-free translator for testing
//! the proxy without reaching MyMemory.
//!
//! # Example
//!
//! ```ignore
//! use lingobridge_mt::{MachineTranslator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", Some("en"), "fr").await.unwrap();
//!     assert_eq!(result.text, "hello_fr");
//! }
//! ```

use crate::error::{MtError, MtResult};
use crate::translator::{MachineTranslator, Translation, source_for_upstream};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append locale suffix: "hello" → "hello_fr"
    Suffix,

    /// Use predefined mappings for realistic translations
    /// (text, target_locale) → translation
    Mappings(HashMap<(String, String), String>),

    /// Simulate an upstream failure
    Error(String),

    /// Simulate a local failure such as a broken configuration
    Internal(String),

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self { mode, delay_ms: 0 }
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// ```ignore
    /// let mock = MockTranslator::with_delay(MockMode::Suffix, 50);
    /// // Each translation will have ~50ms delay
    /// ```
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self { mode, delay_ms }
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn apply_translation(&self, text: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(msg) => Err(MtError::TranslationError(msg.clone())),
            MockMode::Internal(msg) => Err(MtError::ConfigError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_locale: Option<&str>,
        target_locale: &str,
    ) -> MtResult<Translation> {
        self.apply_delay().await;

        let text = self.apply_translation(text, target_locale)?;
        // Pretend auto-detection always lands on English
        let detected_source = match source_for_upstream(source_locale) {
            None => Some("en".to_string()),
            Some(_) => None,
        };

        Ok(Translation {
            text,
            detected_source,
        })
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

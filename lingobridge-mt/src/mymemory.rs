//! MyMemory provider for machine translation
//!
//! Talks to the free MyMemory API (<https://mymemory.translated.net/doc/spec.php>):
//! one `GET /get?q=...&langpair=src|tgt` per translation, no API key.
//!
//! # Configuration
//!
//! [`MyMemoryProvider::from_env`] reads:
//!
//! * `MYMEMORY_URL` - base URL, defaults to `https://api.mymemory.translated.net`
//! * `MYMEMORY_EMAIL` - optional contact address sent as `de`, which raises the
//!   anonymous daily quota
//!
//! # Example
//!
//! ```ignore
//! use lingobridge_mt::{MachineTranslator, MyMemoryProvider};
//!
//! let provider = MyMemoryProvider::new(MyMemoryProvider::DEFAULT_BASE_URL)?
//!     .with_contact_email("me@example.com");
//! let result = provider.translate("Hello", Some("en"), "es").await?;
//! assert_eq!(result.text, "Hola");
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde::Deserialize;
use tracing::debug;

use crate::error::{MtError, MtResult};
use crate::translator::{MachineTranslator, Translation, language_pair, validate_locale};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    #[serde(default)]
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    #[serde(default)]
    translated_text: Option<String>,
    #[serde(default)]
    detected_language: Option<String>,
}

/// MyMemory translation API provider
#[derive(Debug, Clone)]
pub struct MyMemoryProvider {
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL the `get` endpoint is resolved against
    base_url: Url,
    /// Contact address forwarded as the `de` parameter
    contact_email: Option<String>,
}

impl MyMemoryProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.mymemory.translated.net";

    /// Identifier reported to clients as `provider`
    pub const PROVIDER_NAME: &'static str = "mymemory";

    /// Create a provider for the given base URL using the transport's default timeout
    ///
    /// A base URL with a path must end in `/` for the path to be kept,
    /// e.g. `http://localhost:8080/mymemory/`.
    pub fn new(base_url: &str) -> MtResult<Self> {
        Self::build(base_url, None)
    }

    /// Create a provider whose outbound calls give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> MtResult<Self> {
        Self::build(base_url, Some(timeout))
    }

    fn build(base_url: &str, timeout: Option<Duration>) -> MtResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| MtError::ConfigError(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(MtError::ConfigError(format!(
                "Base URL '{}' cannot have a path",
                base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| MtError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            contact_email: None,
        })
    }

    /// Create a provider from `MYMEMORY_URL` and `MYMEMORY_EMAIL`
    pub fn from_env() -> MtResult<Self> {
        let base_url =
            std::env::var("MYMEMORY_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        let provider = Self::new(&base_url)?;

        Ok(match std::env::var("MYMEMORY_EMAIL") {
            Ok(email) if !email.trim().is_empty() => provider.with_contact_email(email),
            _ => provider,
        })
    }

    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full upstream URL for one translation
    fn request_url(
        &self,
        text: &str,
        source_locale: Option<&str>,
        target_locale: &str,
    ) -> MtResult<Url> {
        let mut url = self
            .base_url
            .join("get")
            .map_err(|e| MtError::ConfigError(format!("Invalid upstream URL: {}", e)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("q", text);
            query.append_pair("langpair", &language_pair(source_locale, target_locale));
            if let Some(email) = &self.contact_email {
                query.append_pair("de", email);
            }
        }

        Ok(url)
    }

    /// Pull the translated text out of a decoded response body
    fn extract(body: &[u8]) -> MtResult<Translation> {
        let response: MyMemoryResponse =
            serde_json::from_slice(body).map_err(|e| MtError::BadResponse(e.to_string()))?;

        let data = response.response_data.ok_or(MtError::EmptyTranslation)?;
        let text = data
            .translated_text
            .filter(|text| !text.is_empty())
            .ok_or(MtError::EmptyTranslation)?;

        Ok(Translation {
            text,
            detected_source: data.detected_language,
        })
    }
}

#[async_trait]
impl MachineTranslator for MyMemoryProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: Option<&str>,
        target_locale: &str,
    ) -> MtResult<Translation> {
        validate_locale(target_locale)?;
        if let Some(source) = source_locale.filter(|s| !s.is_empty()) {
            validate_locale(source)?;
        }

        let url = self.request_url(text, source_locale, target_locale)?;
        debug!(
            "MyMemory request: langpair={}",
            language_pair(source_locale, target_locale)
        );

        // Every call must reach the live upstream
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MtError::UpstreamStatus(status));
        }

        let body = response.bytes().await?;
        Self::extract(&body)
    }

    fn provider_name(&self) -> &str {
        Self::PROVIDER_NAME
    }
}

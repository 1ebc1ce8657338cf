//! HTTP access to the proxy endpoint.

use async_trait::async_trait;
use lingobridge::{ErrorBody, TranslateBody, TranslateResponse, TranslationRequest, TranslationResult};
use reqwest::Url;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Something that can turn a [`TranslationRequest`] into a result.
///
/// The controller only talks to this trait, so tests can substitute a backend
/// whose completions they control.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> ClientResult<TranslationResult>;
}

/// Client for `POST {base}/translate`.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ProxyClient {
    pub const DEFAULT_URL: &'static str = "http://127.0.0.1:3000";

    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Self::with_client(reqwest::Client::new(), base)
    }

    pub fn with_client(client: reqwest::Client, mut base: Url) -> ClientResult<Self> {
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base.to_string()));
        }
        // Resolve relative to the whole base path
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join("translate")
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch the proxy's language table from the `languages` route next to `translate`.
    pub async fn languages(&self) -> ClientResult<Vec<lingobridge::LanguageEntry>> {
        let url = self
            .endpoint
            .join("languages")
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(rejection(status, &bytes));
        }
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Build the error for a non-2xx answer, preferring the proxy's own message
fn rejection(status: reqwest::StatusCode, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|body| body.error)
        .unwrap_or_else(|_| format!("Request failed: {}", status.as_u16()));
    ClientError::Rejected { status, message }
}

#[async_trait]
impl TranslationBackend for ProxyClient {
    async fn translate(&self, request: &TranslationRequest) -> ClientResult<TranslationResult> {
        debug!(
            "POST {} ({} → {})",
            self.endpoint,
            request.source_language(),
            request.target_language()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&TranslateBody::from(request))
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(rejection(status, &bytes));
        }

        let body: TranslateResponse =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(body.into())
    }
}

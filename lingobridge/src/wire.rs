//! JSON shapes exchanged between the client and the proxy endpoint.

use serde::{Deserialize, Serialize};

use crate::types::{TranslationRequest, TranslationResult};

/// Body of `POST /translate`.
///
/// Every field is optional on the wire so that the proxy can report missing
/// fields with its own error instead of a deserializer rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl From<&TranslationRequest> for TranslateBody {
    fn from(request: &TranslationRequest) -> Self {
        TranslateBody {
            q: Some(request.source_text().to_string()),
            source: Some(request.source_language().as_str().to_string()),
            target: Some(request.target_language().as_str().to_string()),
        }
    }
}

/// Successful response of `POST /translate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_source_language: Option<String>,
}

impl From<TranslateResponse> for TranslationResult {
    fn from(response: TranslateResponse) -> Self {
        TranslationResult {
            translated_text: response.translated_text,
            provider_name: response.provider,
            detected_source_language: response.detected_source_language,
        }
    }
}

/// Body of every non-2xx response of the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

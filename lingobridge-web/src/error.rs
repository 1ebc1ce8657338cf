use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lingobridge::ErrorBody;
use lingobridge_mt::MtError;
use tracing::{error, warn};

/// Every failure the proxy can report, already classified for the client.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Input the client can fix: missing fields, malformed JSON, bad codes
    #[error("{0}")]
    BadRequest(String),
    /// Upstream unreachable, failing, or answering with unusable data
    #[error("{0}")]
    UpstreamUnavailable(String),
    /// Anything that went wrong on our side of the hop
    #[error("{0}")]
    Internal(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MtError> for ProxyError {
    fn from(err: MtError) -> Self {
        // Upstream details go to the log, the client gets a generic message
        if err.is_upstream() {
            warn!("Upstream call failed: {}", err);
        }

        match err {
            MtError::InvalidLocale(msg) => ProxyError::BadRequest(msg),
            MtError::UpstreamStatus(status) => {
                ProxyError::UpstreamUnavailable(format!("Upstream failed: {}", status.as_u16()))
            }
            MtError::NetworkError(_) => {
                ProxyError::UpstreamUnavailable("Upstream unavailable".to_string())
            }
            MtError::BadResponse(_) => ProxyError::UpstreamUnavailable(
                "Upstream returned an unreadable response".to_string(),
            ),
            MtError::EmptyTranslation => {
                ProxyError::UpstreamUnavailable("No translation returned".to_string())
            }
            MtError::TranslationError(_) => {
                ProxyError::UpstreamUnavailable("Translation service error".to_string())
            }
            MtError::ConfigError(msg) => {
                error!("Proxy misconfigured: {}", msg);
                ProxyError::Internal(msg)
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

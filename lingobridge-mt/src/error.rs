/// Error types for the machine translation providers
#[derive(Debug, thiserror::Error)]
pub enum MtError {
    /// Locale code contains characters the upstream query cannot carry
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),
    /// The upstream answered with a non-success HTTP status
    #[error("Upstream failed: {0}")]
    UpstreamStatus(reqwest::StatusCode),
    /// The outbound call did not complete
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    /// The upstream answered 2xx with a body we could not decode
    #[error("Bad upstream response: {0}")]
    BadResponse(String),
    /// The upstream answered without a usable translated text
    #[error("No translation returned")]
    EmptyTranslation,
    /// Provider-reported translation failure
    #[error("Translation error: {0}")]
    TranslationError(String),
    /// Local misconfiguration (bad base URL, client construction)
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MtError {
    /// True when the failure originates on the upstream side of the hop.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            MtError::UpstreamStatus(_)
                | MtError::NetworkError(_)
                | MtError::BadResponse(_)
                | MtError::EmptyTranslation
                | MtError::TranslationError(_)
        )
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;

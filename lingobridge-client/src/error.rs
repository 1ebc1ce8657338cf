/// Why a request to the proxy did not produce a result
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The proxy answered with an error status; `message` is its `error` field
    #[error("{message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
    },
    /// The request never completed
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The proxy answered 2xx with something other than a translation
    #[error("Unexpected response from proxy: {0}")]
    Decode(String),
    /// The proxy URL could not be used
    #[error("Invalid proxy URL: {0}")]
    InvalidUrl(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

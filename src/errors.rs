use reqwest::StatusCode;
use thiserror::Error;

/// Failures reported by a completion provider
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Input message too long. Message: {0}")]
    ContextLengthExceeded(String),

    #[error("Server error: {0}")]
    Server(StatusCode),

    #[error("Request failed: {0}")]
    RequestFailed(StatusCode),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

//! Transport-level error types.

use thiserror::Error;

/// Errors that can occur while talking to the interpretation backend.
///
/// All variants are recoverable by user retry; nothing here is fatal to the
/// process. Variants are `Clone` so mocks can replay canned failures.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Non-2xx HTTP status from the backend.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// Connection-level failure (DNS, refused, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The backend answered 2xx but reported an application error.
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

use thiserror::Error;

/// Failures while turning a response payload into a typed response.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload has an unexpected shape")]
    CastFailed,

    #[error("JSON decode error: {0}")]
    JsonDecodeFailed(#[from] serde_json::Error),

    #[error("payload is not decodable markup")]
    MarkupDecodeFailed,

    #[error("failed to generate payload: {0}")]
    PayloadGenerationFailed(String),
}

/// Network-layer failures. Cancellation is reported here too.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transfer was cancelled")]
    Cancelled,

    #[error("transfer timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e)
        } else {
            TransportError::Http(e)
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create URL from {0:?}")]
    InvalidUrl(String),

    #[error("failed to create request for {0:?}")]
    UnsupportedRequestConstruction(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("response contained no data")]
    NoData,

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Never raised by the session itself. Higher layers that drop stale
    /// completions can use it to report them.
    #[error("result is expired")]
    Expired,

    #[error("task {0} was already sent")]
    DuplicateTask(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("no Tokio runtime is available to run transfers")]
    NoRuntime,

    #[error("failed to initialise parser: {0}")]
    Parser(#[from] regex::Error),
}

impl Error {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Transport(TransportError::Cancelled))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = DecodeError::from(json_err).into();
        assert!(matches!(err, Error::Decode(DecodeError::JsonDecodeFailed(_))));
    }

    #[test]
    fn test_cancelled_detection() {
        let err: Error = TransportError::Cancelled.into();
        assert!(err.is_cancelled());
        assert!(!Error::NoData.is_cancelled());
        assert_eq!(err.to_string(), "transfer was cancelled");
    }

    #[test]
    fn test_duplicate_task_message() {
        let err = Error::DuplicateTask("abc".to_string());
        assert_eq!(err.to_string(), "task abc was already sent");
    }
}

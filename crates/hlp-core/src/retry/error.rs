//! Step error type for retry classification.

use std::fmt;

/// Error returned by a single attempt of a pipeline step.
/// Kept typed so the retry loop can classify it before it is reported.
#[derive(Debug)]
pub enum StepError {
    /// Curl reported an error (timeout, connection, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Object storage call failed (S3 service or transport error).
    Storage(String),
    /// Transcode service rejected or failed the job submission.
    Transcode(String),
    /// Required setting is missing or unusable. Not retried.
    Config(String),
    /// A fetched document did not have the expected shape. Not retried.
    Data(String),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::Curl(e) => write!(f, "{}", e),
            StepError::Http(code) => write!(f, "HTTP {}", code),
            StepError::Storage(msg) => write!(f, "storage: {}", msg),
            StepError::Transcode(msg) => write!(f, "transcode: {}", msg),
            StepError::Config(msg) => write!(f, "config: {}", msg),
            StepError::Data(msg) => write!(f, "unexpected data: {}", msg),
        }
    }
}

impl std::error::Error for StepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StepError::Curl(e) => Some(e),
            _ => None,
        }
    }
}

impl From<curl::Error> for StepError {
    fn from(e: curl::Error) -> Self {
        StepError::Curl(e)
    }
}

/// Terminal failure of a named step, returned once retries are exhausted
/// or the error is not retryable.
#[derive(Debug, thiserror::Error)]
#[error("step `{step}` failed after {attempts} attempt(s): {source}")]
pub struct StepFailure {
    pub step: String,
    pub attempts: u32,
    #[source]
    pub source: StepError,
}

use std::time::Duration;

/// High-level classification of an error for retry purposes.
///
/// Callers map HTTP status codes, curl errors, and service failures into
/// these kinds; only the transient ones are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Server asked us to slow down (e.g. 429, 503).
    Throttled,
    /// Network-level failure (connection reset, DNS, etc.).
    Connection,
    /// Any other curl transport failure.
    Transport,
    /// Non-2xx HTTP status that is not auth or throttling.
    HttpStatus(u16),
    /// Storage or transcode service error.
    Service,
    /// Credentials rejected (401/403).
    Auth,
    /// Missing or invalid setting.
    Config,
    /// Response did not have the expected shape.
    MalformedData,
}

impl ErrorKind {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(self) -> bool {
        !matches!(
            self,
            ErrorKind::Auth | ErrorKind::Config | ErrorKind::MalformedData
        )
    }
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Wait between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// A policy that makes exactly one attempt.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Decide what to do after `attempt` failed with `kind`.
    ///
    /// `attempt` is 1-based (1 = first attempt). Returns `RetryDecision::NoRetry`
    /// when the attempt was the last permitted one or the error is not transient.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts || !kind.is_retryable() {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.delay)
    }
}

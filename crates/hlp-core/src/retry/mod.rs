//! Retry policy and the retry loop.
//!
//! This module encapsulates error classification (timeouts, throttling,
//! service failures, bad data) and fixed-delay retry decisions so that the
//! pipeline driver and standalone step runs share a consistent policy.

mod classify;
mod error;
mod policy;
mod run;
mod sleep;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::{StepError, StepFailure};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
pub use sleep::{Sleeper, ThreadSleeper};

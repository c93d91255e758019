//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::error::{StepError, StepFailure};
use super::policy::{RetryDecision, RetryPolicy};
use super::sleep::Sleeper;

/// Runs `f` until it succeeds or the retry policy says to stop.
/// On retryable failure, waits for the policy delay then tries again.
///
/// Returns the number of attempts used on success. The error of the last
/// attempt is returned as a [`StepFailure`] and never swallowed.
pub fn run_with_retry<F>(
    name: &str,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut f: F,
) -> Result<u32, StepFailure>
where
    F: FnMut() -> Result<(), StepError>,
{
    let max = policy.max_attempts.max(1);
    let mut attempt = 1u32;
    loop {
        tracing::info!(step = name, attempt, "running {} (attempt {}/{})", name, attempt, max);
        match f() {
            Ok(()) => {
                tracing::info!(step = name, attempt, "{} completed successfully", name);
                return Ok(attempt);
            }
            Err(e) => {
                let kind = classify::classify(&e);
                tracing::warn!(step = name, attempt, ?kind, "error running {}: {}", name, e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => {
                        if kind.is_retryable() {
                            tracing::error!("{} failed after {} attempts", name, attempt);
                        } else {
                            tracing::error!(?kind, "{} failed with a non-retryable error", name);
                        }
                        return Err(StepFailure {
                            step: name.to_string(),
                            attempts: attempt,
                            source: e,
                        });
                    }
                    RetryDecision::RetryAfter(d) => {
                        tracing::info!(step = name, "retrying in {} seconds", d.as_secs());
                        sleeper.sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}

//! Retry loop with exponential backoff.

use std::fmt::Display;
use std::future::Future;

use tracing::warn;

use crate::config::RetryPolicy;

/// Run `op` until it succeeds, fails with an error `should_retry` rejects,
/// or `policy.max_attempts` is reached.
///
/// `op` receives the 1-based attempt number. The last error is returned
/// as-is once attempts are exhausted; there is no wait after the final
/// attempt.
pub async fn retry<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    should_retry: P,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let err = match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !should_retry(&err) {
            return Err(err);
        }

        if attempt >= max_attempts {
            warn!(
                error = %err,
                attempt,
                max_attempts,
                "Max retry attempts exhausted"
            );
            return Err(err);
        }

        let delay = policy.delay_for(attempt);
        warn!(
            error = %err,
            attempt,
            max_attempts,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Retrying after error"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

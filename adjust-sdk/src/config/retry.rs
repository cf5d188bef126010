//! Retry policy for event delivery.

use std::time::Duration;

/// How failed deliveries are re-attempted.
///
/// The delay after the n-th failed attempt (1-based) is
/// `multiplier * 2^(n-1)`, clamped to `[min_delay, max_delay]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub multiplier: Duration,
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// Also retry timeouts and connection failures, not only HTTP 500.
    pub retry_transport_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            multiplier: Duration::from_secs(1),
            min_delay: Duration::from_secs(4),
            max_delay: Duration::from_secs(10),
            retry_transport_errors: false,
        }
    }
}

impl RetryPolicy {
    /// A policy that retries without waiting.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            multiplier: Duration::ZERO,
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            retry_transport_errors: false,
        }
    }

    /// Never retry; a single attempt.
    pub fn none() -> Self {
        Self::immediate(1)
    }

    /// Delay to wait after `attempt` (1-based) has failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let backoff = self.multiplier.saturating_mul(1u32 << exponent);
        backoff.clamp(self.min_delay, self.max_delay.max(self.min_delay))
    }
}

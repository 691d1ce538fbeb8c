use std::time::Duration;

/// Retry behavior for requests that hit the backend's rate limit or a
/// transport failure.
///
/// The backoff doubles on every attempt; the settle delay is slept after
/// each successful request to keep bursts of sequential calls under the
/// backend's limit.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub settle: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(2),
            settle: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy with no delays, for tests.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::ZERO,
            settle: Duration::ZERO,
        }
    }

    /// Backoff to sleep after the given 1-based attempt fails.
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff * 2u32.pow(exponent)
    }
}

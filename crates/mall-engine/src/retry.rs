//! Retry policies for engine requests.

use std::time::Duration;

/// Delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffStrategy {
    None,
    /// Doubles from `base` on each attempt, capped at `max`.
    Exponential { base: Duration, max: Duration },
}

impl BackoffStrategy {
    /// Delay before retrying after failed attempt `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match *self {
            Self::None => Duration::ZERO,
            Self::Exponential { base, max } => {
                base.saturating_mul(2u32.saturating_pow(attempt)).min(max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_secs(2),
        }
    }
}

/// How an engine request attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The engine answered with a non-2xx status.
    Status(u16),
    Timeout,
    Connect,
    /// Anything else reqwest reports (bad URL, body errors).
    Other,
}

impl AttemptFailure {
    /// Overload, server errors and network trouble may clear up; a rejected
    /// request will not.
    pub fn is_transient(&self) -> bool {
        match *self {
            Self::Status(status) => status == 429 || (500..600).contains(&status),
            Self::Timeout | Self::Connect => true,
            Self::Other => false,
        }
    }
}

/// How many times to retry a transient failure, and how long to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: BackoffStrategy::default(),
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: BackoffStrategy::None,
        }
    }

    /// Whether failed attempt `attempt` (0-indexed) should be retried.
    pub fn should_retry(&self, failure: AttemptFailure, attempt: u32) -> bool {
        attempt < self.max_retries && failure.is_transient()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff_caps() {
        let backoff = BackoffStrategy::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(500),
        };
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_attempt(2), Duration::from_millis(400));
        assert_eq!(backoff.delay_for_attempt(3), Duration::from_millis(500));
        assert_eq!(backoff.delay_for_attempt(40), Duration::from_millis(500));
    }

    #[test]
    fn test_transient_failures() {
        assert!(AttemptFailure::Status(503).is_transient());
        assert!(AttemptFailure::Status(429).is_transient());
        assert!(AttemptFailure::Timeout.is_transient());
        assert!(AttemptFailure::Connect.is_transient());
        assert!(!AttemptFailure::Status(400).is_transient());
        assert!(!AttemptFailure::Status(404).is_transient());
        assert!(!AttemptFailure::Other.is_transient());
    }

    #[test]
    fn test_retries_are_bounded() {
        let policy = RetryPolicy::new(2);
        assert!(policy.should_retry(AttemptFailure::Status(503), 0));
        assert!(policy.should_retry(AttemptFailure::Timeout, 1));
        assert!(!policy.should_retry(AttemptFailure::Status(503), 2));
        assert!(!policy.should_retry(AttemptFailure::Status(400), 0));
    }

    #[test]
    fn test_none_never_retries() {
        let policy = RetryPolicy::none();
        assert!(!policy.should_retry(AttemptFailure::Status(503), 0));
        assert!(!policy.should_retry(AttemptFailure::Connect, 0));
        assert_eq!(policy.backoff.delay_for_attempt(3), Duration::ZERO);
    }
}

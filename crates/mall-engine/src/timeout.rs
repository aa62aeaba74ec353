//! Timeout configuration for engine requests.

use std::time::Duration;

/// Timeout configuration for an engine request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total request timeout, including reading the body.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Derive the connect timeout as a quarter of the total.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_secs(5))
    }
}

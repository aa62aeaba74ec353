//! Engine endpoint configuration.

use std::time::Duration;

use crate::retry::RetryPolicy;
use crate::timeout::TimeoutConfig;

pub const DEFAULT_URL: &str = "http://localhost:9200";
pub const DEFAULT_INDEX: &str = "pms";

/// Where the product index lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Base URL of the engine.
    pub url: String,
    /// Product index name.
    pub index: String,
    pub timeout: TimeoutConfig,
    pub retry: RetryPolicy,
    /// Ask the engine to refresh after writes so they are searchable at once.
    pub refresh: bool,
}

impl EngineConfig {
    pub fn new(url: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            index: index.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, total: Duration) -> Self {
        self.timeout = TimeoutConfig::from_total(total);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// URL of an endpoint under the index, e.g. `_search`.
    pub fn index_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.url.trim_end_matches('/'),
            self.index,
            path.trim_start_matches('/')
        )
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            index: DEFAULT_INDEX.to_string(),
            timeout: TimeoutConfig::default(),
            retry: RetryPolicy::default(),
            refresh: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_url() {
        let config = EngineConfig::new("http://es:9200/", "pms");
        assert_eq!(config.index_url("_search"), "http://es:9200/pms/_search");
        assert_eq!(config.index_url("/_doc/7"), "http://es:9200/pms/_doc/7");
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.url, "http://localhost:9200");
        assert_eq!(config.index, "pms");
        assert!(config.refresh);
        assert_eq!(config.retry.max_retries, 1);
    }
}

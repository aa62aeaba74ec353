//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use mall_engine::{EngineConfig, RetryPolicy};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["mall.toml", ".mall.toml", "mall.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MallConfig {
    /// Search engine connection.
    #[serde(default)]
    pub engine: EngineSection,

    /// Search defaults.
    #[serde(default)]
    pub search: SearchSection,

    /// Product source.
    #[serde(default)]
    pub source: SourceSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl MallConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config content, choosing the format by file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Engine client settings.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(&self.engine.url, &self.engine.index)
            .with_timeout(Duration::from_millis(self.engine.timeout_ms))
            .with_retry(RetryPolicy::new(self.engine.max_retries))
            .with_refresh(self.engine.refresh)
    }
}

/// Engine connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSection {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_index")]
    pub index: String,

    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra attempts after a retryable failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Refresh the index after writes.
    #[serde(default = "default_true")]
    pub refresh: bool,
}

fn default_url() -> String {
    mall_engine::DEFAULT_URL.to_string()
}

fn default_index() -> String {
    mall_engine::DEFAULT_INDEX.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            url: default_url(),
            index: default_index(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            refresh: true,
        }
    }
}

/// Search defaults applied when flags are omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,

    /// Sort code (0 relevance, 1 newest, 2 sales, 3 price asc, 4 price desc).
    #[serde(default)]
    pub default_sort: i32,
}

fn default_page_size() -> i64 {
    5
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            default_sort: 0,
        }
    }
}

/// Where products are loaded from for import, create and recommend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    /// Path to a JSON array of products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Generate a default mall.toml config file.
pub fn generate_default_config() -> String {
    r#"# Mall product search configuration

[engine]
url = "http://localhost:9200"
index = "pms"
timeout_ms = 5000
max_retries = 1
refresh = true

[search]
default_page_size = 5
# 0 relevance, 1 newest, 2 sales, 3 price asc, 4 price desc
default_sort = 0

[source]
# JSON array of products used by import, create and recommend
# products = "products.json"

[logging]
level = "info"
format = "human"
"#
    .to_string()
}

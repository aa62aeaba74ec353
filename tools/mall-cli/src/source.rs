//! Product source backed by a JSON file.

use std::path::PathBuf;

use async_trait::async_trait;
use mall_search::catalog::Product;
use mall_search::{ProductSource, SearchError};
use tracing::debug;

/// Reads a JSON array of products on every load.
pub struct JsonFileProductSource {
    path: PathBuf,
}

impl JsonFileProductSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProductSource for JsonFileProductSource {
    async fn load_products(&self, id: Option<i64>) -> Result<Vec<Product>, SearchError> {
        let content = tokio::fs::read(&self.path).await.map_err(|e| {
            SearchError::Source(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let products: Vec<Product> = serde_json::from_slice(&content).map_err(|e| {
            SearchError::Source(format!("failed to parse {}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), count = products.len(), "loaded products");

        Ok(match id {
            Some(id) => products.into_iter().filter(|p| p.id == id).collect(),
            None => products,
        })
    }
}

/// Used when no product file is configured.
pub struct MissingProductSource;

#[async_trait]
impl ProductSource for MissingProductSource {
    async fn load_products(&self, _id: Option<i64>) -> Result<Vec<Product>, SearchError> {
        Err(SearchError::Source(
            "no product source configured; set [source] products in mall.toml".to_string(),
        ))
    }
}

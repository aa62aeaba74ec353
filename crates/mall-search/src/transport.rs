//! Collaborator capabilities the service is built on.

use async_trait::async_trait;

use crate::catalog::Product;
use crate::error::SearchError;
use crate::search::QueryDocument;

/// Access to the search engine index.
///
/// Implementations own connection details, timeouts and retries. Failures
/// surface as [`SearchError::Transport`].
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Execute a query and return the raw response body.
    async fn search(&self, query: &QueryDocument) -> Result<Vec<u8>, SearchError>;

    /// Send a newline-delimited bulk body.
    async fn bulk(&self, body: String) -> Result<(), SearchError>;

    /// Index (create or replace) one document.
    async fn index_document(&self, id: i64, document: &Product) -> Result<(), SearchError>;

    /// Delete one document.
    async fn delete_document(&self, id: i64) -> Result<(), SearchError>;
}

/// The system of record products are imported from.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Indexable products with their attribute values. `Some(id)` restricts
    /// the result to that product (empty when unknown).
    async fn load_products(&self, id: Option<i64>) -> Result<Vec<Product>, SearchError>;
}

#[async_trait]
impl<P: ProductSource + ?Sized> ProductSource for Box<P> {
    async fn load_products(&self, id: Option<i64>) -> Result<Vec<Product>, SearchError> {
        (**self).load_products(id).await
    }
}

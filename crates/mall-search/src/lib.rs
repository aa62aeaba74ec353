//! Product search for the mall catalogue.
//!
//! This crate compiles caller parameters into search-engine query documents
//! and shapes engine responses back into domain types:
//!
//! - **Catalog**: the indexed product document and its attribute values
//! - **Search**: sort and scoring policies, the query compiler, hit pages and
//!   facet parsing
//! - **Bulk**: newline-delimited index/delete bodies
//! - **Service**: orchestration over an injected [`SearchTransport`] and
//!   [`ProductSource`]
//!
//! # Example
//!
//! ```rust,ignore
//! use mall_search::prelude::*;
//!
//! let request = SearchRequest::new()
//!     .with_keyword("phone")
//!     .with_brand(6)
//!     .with_sort_code(3)
//!     .with_pagination(1, 10);
//!
//! let query = request.to_query();
//! let body = transport.search(&query).await?;
//! let page = Page::from_response(&SearchResponse::from_slice(&body)?, request.page)?;
//! ```

pub mod bulk;
pub mod catalog;
pub mod error;
pub mod search;
pub mod service;
pub mod transport;

pub use error::SearchError;
pub use service::ProductSearchService;
pub use transport::{ProductSource, SearchTransport};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::SearchError;
    pub use crate::service::ProductSearchService;
    pub use crate::transport::{ProductSource, SearchTransport};

    // Catalog
    pub use crate::catalog::{AttributeType, AttributeValue, Product};

    // Search
    pub use crate::search::{
        Attr, Filter, Page, PageInfo, PageRequest, QueryDocument, RelatedInfo, SearchRequest,
        SearchResponse, SortDirection, SortOption,
    };
}

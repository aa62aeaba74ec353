//! Search error types.

use thiserror::Error;

/// Errors that can occur while compiling queries or shaping engine responses.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Page size must be positive.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(i64),

    /// The page lies beyond the addressable hit offset.
    #[error("Page {page_num} of size {page_size} is out of range")]
    InvalidPage { page_num: i64, page_size: i64 },

    /// A hit or aggregation section did not match the expected shape.
    #[error("Failed to decode engine response: {0}")]
    Decode(String),

    /// Facet parse invoked on a response without an aggregations section.
    #[error("Engine response has no aggregations section")]
    MissingAggregations,

    /// The engine transport failed.
    #[error("Transport failure{}: {message}", status_suffix(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// A document body could not be serialized.
    #[error("Failed to encode document: {0}")]
    Encode(String),

    /// The product source has no product with this id.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// The product source failed.
    #[error("Product source error: {0}")]
    Source(String),
}

impl SearchError {
    /// Create a transport error carrying an upstream status.
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        SearchError::Transport {
            status,
            message: message.into(),
        }
    }

    /// Upstream status code, for transport failures that have one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(e: serde_json::Error) -> Self {
        SearchError::Decode(e.to_string())
    }
}

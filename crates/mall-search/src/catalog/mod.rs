//! Catalog module.
//!
//! Contains the product document as it is stored in the search index.

mod product;

pub use product::{AttributeType, AttributeValue, Product};

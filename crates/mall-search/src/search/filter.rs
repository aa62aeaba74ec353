//! Exact-match filters.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::search::fields;

/// A non-scoring filter. Filters combine conjunctively.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Filter {
    /// Only products of this brand.
    Brand(i64),
    /// Only products in this category.
    Category(i64),
}

impl Filter {
    pub fn brand(id: i64) -> Self {
        Filter::Brand(id)
    }

    pub fn category(id: i64) -> Self {
        Filter::Category(id)
    }

    /// Filters for whichever ids are present, brand first.
    pub fn from_ids(brand_id: Option<i64>, product_category_id: Option<i64>) -> Vec<Filter> {
        brand_id
            .map(Filter::Brand)
            .into_iter()
            .chain(product_category_id.map(Filter::Category))
            .collect()
    }

    /// Field this filter matches on.
    pub fn field(&self) -> &'static str {
        match self {
            Filter::Brand(_) => fields::BRAND_ID,
            Filter::Category(_) => fields::PRODUCT_CATEGORY_ID,
        }
    }

    pub fn value(&self) -> i64 {
        match self {
            Filter::Brand(id) | Filter::Category(id) => *id,
        }
    }

    /// Term clause: `{ "term": { field: value } }`.
    pub fn to_clause(&self) -> Value {
        let mut term = serde_json::Map::new();
        term.insert(self.field().to_string(), json!(self.value()));
        json!({ "term": term })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_clause() {
        assert_eq!(Filter::brand(6).to_clause(), json!({ "term": { "brandId": 6 } }));
        assert_eq!(
            Filter::category(19).to_clause(),
            json!({ "term": { "productCategoryId": 19 } })
        );
    }

    #[test]
    fn test_from_ids() {
        assert_eq!(Filter::from_ids(None, None), vec![]);
        assert_eq!(Filter::from_ids(None, Some(3)), vec![Filter::Category(3)]);
        assert_eq!(
            Filter::from_ids(Some(1), Some(3)),
            vec![Filter::Brand(1), Filter::Category(3)]
        );
    }
}

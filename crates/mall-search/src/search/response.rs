//! Typed engine response documents.
//!
//! The raw response is decoded once, at the boundary, into these types. A
//! response that does not fit the shape fails here as a whole.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SearchError;

/// A search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Option<Hits>,
    #[serde(default)]
    pub aggregations: Option<Aggregations>,
}

impl SearchResponse {
    /// Decode a raw response body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SearchError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_value(value: Value) -> Result<Self, SearchError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Total matching documents, 0 when the response carries no hits section.
    pub fn total_hits(&self) -> u64 {
        self.hits.as_ref().map(|h| h.total.value()).unwrap_or(0)
    }
}

/// The hits section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: TotalHits,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Total hit count, either `{"value": n, "relation": ..}` or a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Object { value: u64 },
    Count(u64),
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Object { value } | TotalHits::Count(value) => *value,
        }
    }
}

impl Default for TotalHits {
    fn default() -> Self {
        TotalHits::Count(0)
    }
}

/// A single hit. The document body stays raw until it is mapped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

/// The aggregations section of a facet query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Aggregations {
    #[serde(rename = "brandNames", default)]
    pub brand_names: Option<TermsAggregation<TermBucket<String>>>,
    #[serde(rename = "productCategoryNames", default)]
    pub product_category_names: Option<TermsAggregation<TermBucket<String>>>,
    #[serde(rename = "allAttrValues", default)]
    pub all_attr_values: Option<NestedAttrAggregation>,
}

/// A terms aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermsAggregation<B> {
    #[serde(default = "Vec::new")]
    pub buckets: Vec<B>,
}

impl<B> Default for TermsAggregation<B> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }
}

/// A plain terms bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermBucket<K> {
    pub key: K,
    #[serde(default)]
    pub doc_count: u64,
}

/// The nested aggregation over attribute value sub-documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NestedAttrAggregation {
    #[serde(default)]
    pub doc_count: u64,
    #[serde(rename = "attrIds", default)]
    pub attr_ids: Option<TermsAggregation<AttrIdBucket>>,
    /// Parameter-only filter level around `attrIds`.
    #[serde(rename = "productAttrs", default)]
    pub product_attrs: Option<AttrIdsWrapper>,
}

impl NestedAttrAggregation {
    /// Attribute id buckets, wherever they sit.
    pub fn attr_id_buckets(&self) -> &[AttrIdBucket] {
        self.attr_ids
            .as_ref()
            .or_else(|| {
                self.product_attrs
                    .as_ref()
                    .and_then(|wrapper| wrapper.attr_ids.as_ref())
            })
            .map(|agg| agg.buckets.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttrIdsWrapper {
    #[serde(rename = "attrIds", default)]
    pub attr_ids: Option<TermsAggregation<AttrIdBucket>>,
}

/// A bucket keyed by attribute definition id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttrIdBucket {
    pub key: i64,
    #[serde(default)]
    pub doc_count: u64,
    #[serde(rename = "attrValues", default)]
    pub attr_values: Option<TermsAggregation<TermBucket<String>>>,
    #[serde(rename = "attrNames", default)]
    pub attr_names: Option<TermsAggregation<TermBucket<String>>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_hits_shapes() {
        let modern = SearchResponse::from_value(json!({
            "hits": { "total": { "value": 42, "relation": "eq" }, "hits": [] }
        }))
        .unwrap();
        assert_eq!(modern.total_hits(), 42);

        let legacy = SearchResponse::from_value(json!({
            "hits": { "total": 7, "hits": [] }
        }))
        .unwrap();
        assert_eq!(legacy.total_hits(), 7);
    }

    #[test]
    fn test_hit_fields() {
        let response = SearchResponse::from_value(json!({
            "took": 3,
            "hits": {
                "total": { "value": 1 },
                "hits": [{ "_index": "pms", "_id": "26", "_score": 1.5, "_source": { "id": 26 } }]
            }
        }))
        .unwrap();

        let hit = &response.hits.unwrap().hits[0];
        assert_eq!(hit.id.as_deref(), Some("26"));
        assert_eq!(hit.score, Some(1.5));
        assert_eq!(hit.source["id"], 26);
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = SearchResponse::from_slice(b"{ not json").unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));

        let err = SearchResponse::from_value(json!({ "hits": { "hits": "oops" } })).unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[test]
    fn test_attr_buckets_under_parameter_filter() {
        let nested: NestedAttrAggregation = serde_json::from_value(json!({
            "doc_count": 4,
            "productAttrs": {
                "attrIds": { "buckets": [{ "key": 7, "doc_count": 4 }] }
            }
        }))
        .unwrap();

        assert_eq!(nested.attr_id_buckets().len(), 1);
        assert_eq!(nested.attr_id_buckets()[0].key, 7);
    }
}

//! Facet aggregations: brand, category and attribute suggestions.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::catalog::AttributeType;
use crate::error::SearchError;
use crate::search::fields;
use crate::search::response::{AttrIdBucket, SearchResponse, TermBucket, TermsAggregation};

pub const BRAND_NAMES_AGG: &str = "brandNames";
pub const CATEGORY_NAMES_AGG: &str = "productCategoryNames";
pub const ATTR_VALUES_NESTED_AGG: &str = "allAttrValues";
pub const PRODUCT_ATTRS_AGG: &str = "productAttrs";
pub const ATTR_IDS_AGG: &str = "attrIds";
pub const ATTR_VALUES_AGG: &str = "attrValues";
pub const ATTR_NAMES_AGG: &str = "attrNames";

/// An attribute observed in the matched products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attr {
    pub attr_id: i64,
    pub attr_name: String,
    pub attr_values: Vec<String>,
}

/// Filter suggestions derived from a facet query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelatedInfo {
    pub brand_names: Vec<String>,
    pub product_category_names: Vec<String>,
    pub product_attrs: Vec<Attr>,
}

impl RelatedInfo {
    pub fn is_empty(&self) -> bool {
        self.brand_names.is_empty()
            && self.product_category_names.is_empty()
            && self.product_attrs.is_empty()
    }
}

/// The `aggs` section of a facet query.
///
/// `allAttrValues` is nested on the attribute value list. Only parameter
/// values are bucketed (`productAttrs`), by attribute id, each with its
/// distinct values and display names.
pub fn facet_aggregations() -> Value {
    let parameters_only = json!({
        "term": { (fields::ATTR_TYPE): AttributeType::Parameter.code() }
    });

    json!({
        BRAND_NAMES_AGG: { "terms": { "field": fields::BRAND_NAME } },
        CATEGORY_NAMES_AGG: { "terms": { "field": fields::PRODUCT_CATEGORY_NAME } },
        ATTR_VALUES_NESTED_AGG: {
            "nested": { "path": fields::ATTR_VALUE_LIST },
            "aggs": {
                PRODUCT_ATTRS_AGG: {
                    "filter": parameters_only,
                    "aggs": {
                        ATTR_IDS_AGG: {
                            "terms": { "field": fields::ATTR_ID },
                            "aggs": {
                                ATTR_VALUES_AGG: { "terms": { "field": fields::ATTR_VALUE } },
                                ATTR_NAMES_AGG: { "terms": { "field": fields::ATTR_NAME } },
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Unpack facet buckets into [`RelatedInfo`].
///
/// Absent sections yield empty lists; a response with no aggregations at all
/// is an error.
pub fn parse_related(response: &SearchResponse) -> Result<RelatedInfo, SearchError> {
    let aggs = response
        .aggregations
        .as_ref()
        .ok_or(SearchError::MissingAggregations)?;

    let product_attrs: Vec<Attr> = aggs
        .all_attr_values
        .as_ref()
        .map(|nested| nested.attr_id_buckets().iter().map(attr_from_bucket).collect())
        .unwrap_or_default();

    Ok(RelatedInfo {
        brand_names: bucket_keys(aggs.brand_names.as_ref()),
        product_category_names: bucket_keys(aggs.product_category_names.as_ref()),
        product_attrs,
    })
}

fn bucket_keys(agg: Option<&TermsAggregation<TermBucket<String>>>) -> Vec<String> {
    agg.map(|agg| agg.buckets.iter().map(|b| b.key.clone()).collect())
        .unwrap_or_default()
}

// Only the first name is kept when one attribute id carries several.
fn attr_from_bucket(bucket: &AttrIdBucket) -> Attr {
    let attr_name = bucket
        .attr_names
        .as_ref()
        .and_then(|names| names.buckets.first())
        .map(|b| b.key.clone())
        .unwrap_or_default();

    Attr {
        attr_id: bucket.key,
        attr_name,
        attr_values: bucket_keys(bucket.attr_values.as_ref()),
    }
}

//! Query document compiler.
//!
//! Every builder here is pure: it turns request parameters into the JSON query
//! document the engine expects and performs no I/O.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::catalog::Product;
use crate::error::SearchError;
use crate::search::facets::facet_aggregations;
use crate::search::fields;
use crate::search::scoring::ScoringPolicy;
use crate::search::sort::SortOption;
use crate::search::Filter;

/// A compiled query document, ready for the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryDocument(Value);

impl QueryDocument {
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Page number and size requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Requested page (1-indexed). Values below 1 are treated as 1.
    pub page_num: i64,
    /// Items per page. Must be positive.
    pub page_size: i64,
}

impl PageRequest {
    pub fn new(page_num: i64, page_size: i64) -> Self {
        Self {
            page_num,
            page_size,
        }
    }

    /// Effective page number, never below 1.
    pub fn page(&self) -> i64 {
        self.page_num.max(1)
    }

    /// Offset of the first hit. Never negative for a positive page size;
    /// saturates for pages that [`validate`](Self::validate) rejects.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.page_size)
    }

    /// Offset of the first hit, `None` when it does not fit in an `i64`.
    pub fn checked_offset(&self) -> Option<i64> {
        (self.page() - 1).checked_mul(self.page_size)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.page_size <= 0 {
            return Err(SearchError::InvalidPageSize(self.page_size));
        }
        if self.checked_offset().is_none() {
            return Err(SearchError::InvalidPage {
                page_num: self.page_num,
                page_size: self.page_size,
            });
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 5)
    }
}

/// Parameters of a filtered, sorted product search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Text query, possibly empty.
    pub keyword: String,
    pub brand_id: Option<i64>,
    pub product_category_id: Option<i64>,
    pub sort: SortOption,
    pub page: PageRequest,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_brand(mut self, brand_id: i64) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    pub fn with_category(mut self, product_category_id: i64) -> Self {
        self.product_category_id = Some(product_category_id);
        self
    }

    /// Set the sort from its integer code.
    pub fn with_sort_code(mut self, code: i32) -> Self {
        self.sort = SortOption::from_code(code);
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_pagination(mut self, page_num: i64, page_size: i64) -> Self {
        self.page = PageRequest::new(page_num, page_size);
        self
    }

    /// Filters for the ids present on this request.
    pub fn filters(&self) -> Vec<Filter> {
        Filter::from_ids(self.brand_id, self.product_category_id)
    }

    /// Compile this request into a query document.
    pub fn to_query(&self) -> QueryDocument {
        build_filtered_search(self)
    }
}

fn has_keyword(keyword: &str) -> bool {
    !keyword.trim().is_empty()
}

fn paginate(mut body: Value, page: PageRequest) -> Value {
    body["from"] = json!(page.offset());
    body["size"] = json!(page.page_size);
    body
}

/// Lightweight keyword search: any of name, subtitle or keywords may match.
pub fn build_simple_search(keyword: &str, page: PageRequest) -> QueryDocument {
    let should: Vec<Value> = fields::TEXT_FIELDS
        .iter()
        .map(|field| {
            let mut m = serde_json::Map::new();
            m.insert(field.to_string(), json!(keyword));
            json!({ "match": m })
        })
        .collect();

    let body = json!({ "query": { "bool": { "should": should } } });
    QueryDocument(paginate(body, page))
}

/// Relevance clause for filtered search.
///
/// A non-empty keyword yields a boosted multi-field match with a minimum
/// score; an empty keyword matches everything.
pub fn relevance_clause(keyword: &str) -> Value {
    if !has_keyword(keyword) {
        return json!({ "match_all": {} });
    }

    let policy = ScoringPolicy::FILTERED_SEARCH;
    let mut function_score = serde_json::Map::new();
    function_score.insert(
        "query".to_string(),
        json!({
            "multi_match": {
                "query": keyword,
                "fields": policy.field_specs(),
            }
        }),
    );
    if let Some(mode) = policy.score_mode {
        function_score.insert("score_mode".to_string(), json!(mode.as_str()));
    }
    if let Some(min_score) = policy.min_score {
        function_score.insert("min_score".to_string(), json!(min_score));
    }

    json!({ "function_score": function_score })
}

/// Filtered and sorted search.
///
/// The relevance clause is required (`must`) and every present filter is an
/// additional conjunctive `filter` term.
pub fn build_filtered_search(request: &SearchRequest) -> QueryDocument {
    let filters: Vec<Value> = request.filters().iter().map(Filter::to_clause).collect();

    let body = json!({
        "query": {
            "bool": {
                "must": [relevance_clause(&request.keyword)],
                "filter": filters,
            }
        },
        "sort": [request.sort.to_sort_clause()],
    });

    QueryDocument(paginate(body, request.page))
}

/// Products similar to `source`, excluding `exclude_id` itself.
///
/// Each weighted field is an optional `should` clause, so partial matches
/// are eligible and rank by accumulated boost.
pub fn build_recommendation(exclude_id: i64, source: &Product, page: PageRequest) -> QueryDocument {
    let should: Vec<Value> = ScoringPolicy::RECOMMENDATION
        .boosts
        .iter()
        .map(|boost| {
            let mut m = serde_json::Map::new();
            m.insert(
                boost.field.to_string(),
                json!({ "query": source_value(source, boost.field), "boost": boost.boost }),
            );
            json!({ "match": m })
        })
        .collect();

    let body = json!({
        "query": {
            "bool": {
                "must_not": [{ "term": { (fields::ID): exclude_id } }],
                "should": should,
            }
        }
    });

    QueryDocument(paginate(body, page))
}

fn source_value(product: &Product, field: &str) -> Value {
    match field {
        fields::NAME => json!(product.name),
        fields::SUB_TITLE => json!(product.sub_title),
        fields::KEYWORDS => json!(product.keywords),
        fields::BRAND_ID => json!(product.brand_id),
        fields::PRODUCT_CATEGORY_ID => json!(product.product_category_id),
        _ => Value::Null,
    }
}

/// Facet query: brand, category and attribute buckets over matching products.
pub fn build_related_facets(keyword: &str) -> QueryDocument {
    let query = if has_keyword(keyword) {
        json!({
            "multi_match": {
                "query": keyword,
                "fields": fields::TEXT_FIELDS,
            }
        })
    } else {
        json!({ "match_all": {} })
    };

    QueryDocument(json!({
        "query": query,
        "aggs": facet_aggregations(),
    }))
}

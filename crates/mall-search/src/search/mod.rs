//! Search module.
//!
//! Query compilation (sort, scoring, filters, pagination) and response shaping
//! (hit pages, facet buckets).

pub mod fields;
mod facets;
mod filter;
mod query;
mod response;
mod results;
mod scoring;
mod sort;

pub use facets::{facet_aggregations, parse_related, Attr, RelatedInfo};
pub use filter::Filter;
pub use query::{
    build_filtered_search, build_recommendation, build_related_facets, build_simple_search,
    relevance_clause, PageRequest, QueryDocument, SearchRequest,
};
pub use response::{
    Aggregations, AttrIdBucket, Hit, Hits, NestedAttrAggregation, SearchResponse, TermBucket,
    TermsAggregation, TotalHits,
};
pub use results::{map_page, Page, PageInfo};
pub use scoring::{FieldBoost, ScoreMode, ScoringPolicy};
pub use sort::{SortDirection, SortOption, SCORE_FIELD};

//! Search results and pagination.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::SearchError;
use crate::search::query::PageRequest;
use crate::search::response::{Hit, SearchResponse};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Total number of matching documents.
    pub total_elements: u64,
    /// `ceil(total_elements / size)`.
    pub total_pages: u64,
    /// Current page (1-indexed).
    pub number: i64,
    /// Items per page.
    pub size: i64,
}

impl PageInfo {
    /// Build pagination info. Fails for a non-positive page size.
    pub fn new(total_elements: u64, page: PageRequest) -> Result<Self, SearchError> {
        page.validate()?;
        let size = page.page_size as u64;

        Ok(Self {
            total_elements,
            total_pages: total_elements.div_ceil(size),
            number: page.page(),
            size: page.page_size,
        })
    }

    pub fn has_next(&self) -> bool {
        (self.number as u64) < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn is_last(&self) -> bool {
        self.number as u64 >= self.total_pages
    }
}

/// A page of products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub content: Vec<Product>,
    pub page_info: PageInfo,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of products on this page.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Map a decoded search response into a page.
    pub fn from_response(response: &SearchResponse, page: PageRequest) -> Result<Self, SearchError> {
        let hits = response
            .hits
            .as_ref()
            .ok_or_else(|| SearchError::Decode("response has no hits section".to_string()))?;
        map_page(&hits.hits, hits.total.value(), page)
    }
}

/// Decode hits into products and attach pagination.
///
/// A hit whose body does not decode fails the whole page.
pub fn map_page(hits: &[Hit], total_hits: u64, page: PageRequest) -> Result<Page, SearchError> {
    let page_info = PageInfo::new(total_hits, page)?;

    let content = hits
        .iter()
        .map(decode_hit)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page { content, page_info })
}

fn decode_hit(hit: &Hit) -> Result<Product, SearchError> {
    Product::deserialize(&hit.source).map_err(|e| {
        let id = hit.id.as_deref().unwrap_or("?");
        SearchError::Decode(format!("hit {}: {}", id, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(source: serde_json::Value) -> Hit {
        Hit {
            id: source.get("id").map(|id| id.to_string()),
            score: Some(1.0),
            source,
        }
    }

    #[test]
    fn test_empty_page() {
        let page = map_page(&[], 0, PageRequest::new(1, 5)).unwrap();
        assert!(page.is_empty());
        assert_eq!(
            page.page_info,
            PageInfo {
                total_elements: 0,
                total_pages: 0,
                number: 1,
                size: 5
            }
        );
    }

    #[test]
    fn test_total_pages_ceiling() {
        let cases = [(1, 5, 1), (5, 5, 1), (6, 5, 2), (45, 10, 5), (100, 1, 100)];
        for (total, size, expected) in cases {
            let info = PageInfo::new(total, PageRequest::new(1, size)).unwrap();
            assert_eq!(info.total_pages, expected, "total={} size={}", total, size);
        }
    }

    #[test]
    fn test_invalid_page_size() {
        let err = map_page(&[], 10, PageRequest::new(1, 0)).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPageSize(0)));
    }

    #[test]
    fn test_maps_hits_in_order() {
        let hits = vec![
            hit(json!({ "id": 2, "name": "B", "price": 10.5 })),
            hit(json!({ "id": 1, "name": "A" })),
        ];
        let page = map_page(&hits, 12, PageRequest::new(2, 2)).unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page.content[0].id, 2);
        assert_eq!(page.content[0].price, 10.5);
        assert_eq!(page.content[1].name, "A");
        assert_eq!(page.page_info.total_pages, 6);
        assert_eq!(page.page_info.number, 2);
        assert!(page.page_info.has_next());
        assert!(page.page_info.has_prev());
    }

    #[test]
    fn test_bad_hit_fails_whole_page() {
        let hits = vec![
            hit(json!({ "id": 1, "name": "ok" })),
            hit(json!({ "id": 2, "price": "free" })),
        ];
        let err = map_page(&hits, 2, PageRequest::new(1, 10)).unwrap_err();
        assert!(matches!(err, SearchError::Decode(msg) if msg.starts_with("hit 2")));
    }

    #[test]
    fn test_null_numbers_do_not_fail_page() {
        let hits = [hit(json!({ "id": 1, "name": "A", "price": null, "sale": null }))];
        let page = map_page(&hits, 1, PageRequest::new(1, 5)).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.content[0].price, 0.0);
        assert_eq!(page.content[0].sale, 0);
    }

    #[test]
    fn test_page_info_last_page() {
        let info = PageInfo::new(45, PageRequest::new(5, 10)).unwrap();
        assert!(info.is_last());
        assert!(!info.has_next());
    }

    #[test]
    fn test_from_response_requires_hits() {
        let response = SearchResponse::default();
        let err = Page::from_response(&response, PageRequest::new(1, 5)).unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }
}

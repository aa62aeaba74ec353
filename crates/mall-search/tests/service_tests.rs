//! Service tests against in-memory collaborators.

use std::sync::Mutex;

use async_trait::async_trait;
use mall_search::prelude::*;
use serde_json::{json, Value};

#[derive(Default)]
struct FakeTransport {
    response: Value,
    fail_with: Option<u16>,
    queries: Mutex<Vec<Value>>,
    bulk_bodies: Mutex<Vec<String>>,
    indexed: Mutex<Vec<i64>>,
    deleted: Mutex<Vec<i64>>,
}

impl FakeTransport {
    fn responding(response: Value) -> Self {
        Self {
            response,
            ..Default::default()
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Default::default()
        }
    }

    fn last_query(&self) -> Value {
        self.queries.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl SearchTransport for FakeTransport {
    async fn search(&self, query: &QueryDocument) -> Result<Vec<u8>, SearchError> {
        self.queries.lock().unwrap().push(query.as_value().clone());
        if let Some(status) = self.fail_with {
            return Err(SearchError::transport(Some(status), "engine unavailable"));
        }
        Ok(serde_json::to_vec(&self.response).unwrap())
    }

    async fn bulk(&self, body: String) -> Result<(), SearchError> {
        self.bulk_bodies.lock().unwrap().push(body);
        Ok(())
    }

    async fn index_document(&self, id: i64, _document: &Product) -> Result<(), SearchError> {
        self.indexed.lock().unwrap().push(id);
        Ok(())
    }

    async fn delete_document(&self, id: i64) -> Result<(), SearchError> {
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}

struct FakeSource {
    products: Vec<Product>,
}

#[async_trait]
impl ProductSource for FakeSource {
    async fn load_products(&self, id: Option<i64>) -> Result<Vec<Product>, SearchError> {
        Ok(self
            .products
            .iter()
            .filter(|p| id.map_or(true, |id| p.id == id))
            .cloned()
            .collect())
    }
}

fn catalogue() -> FakeSource {
    FakeSource {
        products: vec![
            Product::new(26, "Huawei P30")
                .with_sub_title("Leica camera")
                .with_keywords("phone")
                .with_brand(3, "Huawei")
                .with_category(19, "Phones"),
            Product::new(27, "Mi 8")
                .with_brand(6, "Xiaomi")
                .with_category(19, "Phones"),
        ],
    }
}

fn hits_response(total: u64, sources: Vec<Value>) -> Value {
    let hits: Vec<Value> = sources
        .into_iter()
        .map(|source| json!({ "_id": source["id"].to_string(), "_score": 1.0, "_source": source }))
        .collect();
    json!({ "hits": { "total": { "value": total, "relation": "eq" }, "hits": hits } })
}

#[tokio::test]
async fn test_search_simple_maps_page() {
    let transport = FakeTransport::responding(hits_response(
        11,
        vec![json!({ "id": 26, "name": "Huawei P30" }), json!({ "id": 27, "name": "Mi 8" })],
    ));
    let service = ProductSearchService::new(transport, catalogue());

    let page = service
        .search_simple("phone", PageRequest::new(1, 2))
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.content[1].name, "Mi 8");
    assert_eq!(page.page_info.total_elements, 11);
    assert_eq!(page.page_info.total_pages, 6);

    let query = service.transport().last_query();
    assert_eq!(query["from"], 0);
    assert_eq!(query["size"], 2);
}

#[tokio::test]
async fn test_invalid_page_size_never_reaches_engine() {
    let service = ProductSearchService::new(FakeTransport::default(), catalogue());

    let err = service
        .search(&SearchRequest::new().with_pagination(1, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::InvalidPageSize(0)));
    assert!(service.transport().queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_out_of_range_page_never_reaches_engine() {
    let service = ProductSearchService::new(FakeTransport::default(), catalogue());

    let err = service
        .search_simple("phone", PageRequest::new(i64::MAX, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidPage { .. }));

    let err = service
        .recommend(26, PageRequest::new(i64::MAX, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidPage { .. }));

    assert!(service.transport().queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_filtered_search_sends_filters_and_sort() {
    let service = ProductSearchService::new(
        FakeTransport::responding(hits_response(0, vec![])),
        catalogue(),
    );

    let request = SearchRequest::new()
        .with_keyword("phone")
        .with_brand(3)
        .with_category(19)
        .with_sort_code(4)
        .with_pagination(2, 5);
    let page = service.search(&request).await.unwrap();

    assert!(page.is_empty());
    assert_eq!(page.page_info.total_pages, 0);

    let query = service.transport().last_query();
    assert_eq!(query["query"]["bool"]["filter"].as_array().unwrap().len(), 2);
    assert_eq!(query["sort"], json!([{ "price": { "order": "desc" } }]));
    assert_eq!(query["from"], 5);
}

#[tokio::test]
async fn test_recommend_excludes_source_product() {
    let service = ProductSearchService::new(
        FakeTransport::responding(hits_response(1, vec![json!({ "id": 27, "name": "Mi 8" })])),
        catalogue(),
    );

    let page = service.recommend(26, PageRequest::new(1, 5)).await.unwrap();
    assert_eq!(page.content[0].id, 27);

    let query = service.transport().last_query();
    assert_eq!(query["query"]["bool"]["must_not"], json!([{ "term": { "id": 26 } }]));
    assert_eq!(
        query["query"]["bool"]["should"][0],
        json!({ "match": { "name": { "query": "Huawei P30", "boost": 8 } } })
    );
}

#[tokio::test]
async fn test_recommend_unknown_product() {
    let service = ProductSearchService::new(FakeTransport::default(), catalogue());

    let err = service.recommend(404, PageRequest::new(1, 5)).await.unwrap_err();
    assert!(matches!(err, SearchError::ProductNotFound(404)));
}

#[tokio::test]
async fn test_recommendation_query_is_compiled_without_searching() {
    let service = ProductSearchService::new(FakeTransport::default(), catalogue());

    let query = service
        .recommendation_query(27, PageRequest::new(2, 3))
        .await
        .unwrap();

    assert_eq!(query.as_value()["from"], 3);
    assert_eq!(query.as_value()["query"]["bool"]["must_not"], json!([{ "term": { "id": 27 } }]));
    assert!(service.transport().queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_related() {
    let service = ProductSearchService::new(
        FakeTransport::responding(json!({
            "hits": { "total": { "value": 2 }, "hits": [] },
            "aggregations": {
                "brandNames": { "buckets": [{ "key": "Huawei", "doc_count": 1 }, { "key": "Xiaomi", "doc_count": 1 }] },
                "productCategoryNames": { "buckets": [{ "key": "Phones", "doc_count": 2 }] },
                "allAttrValues": { "doc_count": 0, "attrIds": { "buckets": [] } }
            }
        })),
        catalogue(),
    );

    let info = service.search_related("phone").await.unwrap();
    assert_eq!(info.brand_names, vec!["Huawei", "Xiaomi"]);
    assert_eq!(info.product_category_names, vec!["Phones"]);
    assert!(info.product_attrs.is_empty());
}

#[tokio::test]
async fn test_search_related_without_aggregations() {
    let service = ProductSearchService::new(
        FakeTransport::responding(hits_response(0, vec![])),
        catalogue(),
    );

    let err = service.search_related("").await.unwrap_err();
    assert!(matches!(err, SearchError::MissingAggregations));
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let service = ProductSearchService::new(FakeTransport::failing(503), catalogue());

    let err = service
        .search_simple("phone", PageRequest::new(1, 5))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_import_all_sends_one_bulk_body() {
    let service = ProductSearchService::new(FakeTransport::default(), catalogue());

    let count = service.import_all().await.unwrap();
    assert_eq!(count, 2);

    let bodies = service.transport().bulk_bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0].lines().count(), 4);
    assert!(bodies[0].starts_with(r#"{"index":{"_id":"26"}}"#));
}

#[tokio::test]
async fn test_import_all_empty_catalogue() {
    let service = ProductSearchService::new(
        FakeTransport::default(),
        FakeSource { products: vec![] },
    );

    assert_eq!(service.import_all().await.unwrap(), 0);
    assert!(service.transport().bulk_bodies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_and_delete() {
    let service = ProductSearchService::new(FakeTransport::default(), catalogue());

    let product = service.create(27).await.unwrap();
    assert_eq!(product.name, "Mi 8");
    assert_eq!(*service.transport().indexed.lock().unwrap(), vec![27]);

    service.delete(27).await.unwrap();
    assert_eq!(*service.transport().deleted.lock().unwrap(), vec![27]);

    assert!(matches!(
        service.create(1).await,
        Err(SearchError::ProductNotFound(1))
    ));
}

#[tokio::test]
async fn test_delete_batch() {
    let service = ProductSearchService::new(FakeTransport::default(), catalogue());

    assert_eq!(service.delete_batch(&[]).await.unwrap(), 0);
    assert!(service.transport().bulk_bodies.lock().unwrap().is_empty());

    assert_eq!(service.delete_batch(&[26, 27]).await.unwrap(), 2);
    let bodies = service.transport().bulk_bodies.lock().unwrap();
    assert_eq!(
        bodies[0],
        "{\"delete\":{\"_id\":\"26\"}}\n{\"delete\":{\"_id\":\"27\"}}\n"
    );
}

#[tokio::test]
async fn test_decode_failure_is_atomic() {
    let service = ProductSearchService::new(
        FakeTransport::responding(hits_response(
            2,
            vec![json!({ "id": 26, "name": "ok" }), json!({ "id": 27, "stock": "lots" })],
        )),
        catalogue(),
    );

    let err = service
        .search_simple("phone", PageRequest::new(1, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Decode(_)));
}

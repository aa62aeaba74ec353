//! Product search service.
//!
//! Ties the query compiler and result shaping to an injected transport and
//! product source. Holds no state of its own between calls.

use tracing::{debug, info, instrument};

use crate::bulk;
use crate::catalog::Product;
use crate::error::SearchError;
use crate::search::{
    build_recommendation, build_related_facets, build_simple_search, parse_related, Page,
    PageRequest, QueryDocument, RelatedInfo, SearchRequest, SearchResponse,
};
use crate::transport::{ProductSource, SearchTransport};

pub struct ProductSearchService<T, S> {
    transport: T,
    source: S,
}

impl<T, S> ProductSearchService<T, S>
where
    T: SearchTransport,
    S: ProductSource,
{
    pub fn new(transport: T, source: S) -> Self {
        Self { transport, source }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Index every product from the source. Returns the number indexed.
    #[instrument(skip(self))]
    pub async fn import_all(&self) -> Result<usize, SearchError> {
        let products = self.source.load_products(None).await?;
        if products.is_empty() {
            info!("no products to import");
            return Ok(0);
        }

        let body = bulk::index_body(&products)?;
        self.transport.bulk(body).await?;

        info!(count = products.len(), "imported products");
        Ok(products.len())
    }

    /// Index a single product by id and return it.
    #[instrument(skip(self))]
    pub async fn create(&self, id: i64) -> Result<Product, SearchError> {
        let product = self.load_one(id).await?;
        self.transport.index_document(id, &product).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), SearchError> {
        self.transport.delete_document(id).await
    }

    /// Delete several documents in one bulk request. Returns the number sent.
    #[instrument(skip(self))]
    pub async fn delete_batch(&self, ids: &[i64]) -> Result<usize, SearchError> {
        if ids.is_empty() {
            return Ok(0);
        }
        self.transport.bulk(bulk::delete_body(ids)).await?;
        info!(count = ids.len(), "deleted products");
        Ok(ids.len())
    }

    /// Keyword search over name, subtitle and keywords.
    #[instrument(skip(self))]
    pub async fn search_simple(&self, keyword: &str, page: PageRequest) -> Result<Page, SearchError> {
        page.validate()?;
        let query = build_simple_search(keyword, page);
        self.fetch_page(&query, page).await
    }

    /// Filtered, sorted search.
    #[instrument(skip(self))]
    pub async fn search(&self, request: &SearchRequest) -> Result<Page, SearchError> {
        request.page.validate()?;
        let query = request.to_query();
        self.fetch_page(&query, request.page).await
    }

    /// Products similar to the product with this id.
    #[instrument(skip(self))]
    pub async fn recommend(&self, id: i64, page: PageRequest) -> Result<Page, SearchError> {
        let query = self.recommendation_query(id, page).await?;
        self.fetch_page(&query, page).await
    }

    /// Compile the recommendation query for a product without running it.
    pub async fn recommendation_query(
        &self,
        id: i64,
        page: PageRequest,
    ) -> Result<QueryDocument, SearchError> {
        page.validate()?;
        let source = self.load_one(id).await?;
        Ok(build_recommendation(id, &source, page))
    }

    /// Brand, category and attribute suggestions for a keyword.
    #[instrument(skip(self))]
    pub async fn search_related(&self, keyword: &str) -> Result<RelatedInfo, SearchError> {
        let query = build_related_facets(keyword);
        let response = self.execute(&query).await?;
        parse_related(&response)
    }

    async fn load_one(&self, id: i64) -> Result<Product, SearchError> {
        self.source
            .load_products(Some(id))
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(SearchError::ProductNotFound(id))
    }

    async fn fetch_page(&self, query: &QueryDocument, page: PageRequest) -> Result<Page, SearchError> {
        let response = self.execute(query).await?;
        let page = Page::from_response(&response, page)?;
        debug!(
            hits = page.len(),
            total = page.page_info.total_elements,
            "mapped page"
        );
        Ok(page)
    }

    async fn execute(&self, query: &QueryDocument) -> Result<SearchResponse, SearchError> {
        debug!(query = %query.as_value(), "executing query");
        let body = self.transport.search(query).await?;
        SearchResponse::from_slice(&body)
    }
}

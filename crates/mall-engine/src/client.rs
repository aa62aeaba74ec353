//! HTTP client for an Elasticsearch-compatible engine.

use async_trait::async_trait;
use mall_search::catalog::Product;
use mall_search::search::QueryDocument;
use mall_search::{SearchError, SearchTransport};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::EngineConfig;
use crate::retry::AttemptFailure;

const NDJSON: &str = "application/x-ndjson";

/// Longest raw body quoted in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Engine client with timeout and retry handling.
pub struct EngineClient {
    http: Client,
    config: EngineConfig,
}

impl EngineClient {
    /// Create a new client.
    pub fn new(config: EngineConfig) -> Result<Self, SearchError> {
        let http = Client::builder()
            .connect_timeout(config.timeout.connect)
            .timeout(config.timeout.total)
            .build()
            .map_err(|e| SearchError::transport(None, format!("client setup: {}", e)))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn search_url(&self) -> String {
        self.config.index_url("_search?track_total_hits=true")
    }

    pub fn bulk_url(&self) -> String {
        self.with_refresh(self.config.index_url("_bulk"))
    }

    pub fn document_url(&self, id: i64) -> String {
        self.with_refresh(self.config.index_url(&format!("_doc/{}", id)))
    }

    fn with_refresh(&self, url: String) -> String {
        if self.config.refresh {
            format!("{}?refresh=true", url)
        } else {
            url
        }
    }

    /// Send a request, retrying per the configured policy.
    ///
    /// `build` is called once per attempt. Returns the body of the first 2xx
    /// response.
    async fn send<F>(&self, build: F) -> Result<Vec<u8>, SearchError>
    where
        F: Fn() -> RequestBuilder,
    {
        let policy = &self.config.retry;
        let mut attempt = 0;

        loop {
            match build().send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    let body = resp
                        .bytes()
                        .await
                        .map_err(|e| SearchError::transport(Some(status), e.to_string()))?;

                    if (200..300).contains(&status) {
                        return Ok(body.to_vec());
                    }
                    if policy.should_retry(AttemptFailure::Status(status), attempt) {
                        warn!(status, attempt, "Engine request failed, retrying");
                    } else {
                        return Err(error_from_body(status, &body));
                    }
                }
                Err(e) => {
                    let failure = if e.is_timeout() {
                        AttemptFailure::Timeout
                    } else if e.is_connect() {
                        AttemptFailure::Connect
                    } else {
                        AttemptFailure::Other
                    };
                    if policy.should_retry(failure, attempt) {
                        warn!(error = %e, attempt, "Engine request failed, retrying");
                    } else {
                        let status = e.status().map(|s| s.as_u16());
                        return Err(SearchError::transport(status, e.to_string()));
                    }
                }
            }

            tokio::time::sleep(policy.backoff.delay_for_attempt(attempt)).await;
            attempt += 1;
        }
    }
}

#[async_trait]
impl SearchTransport for EngineClient {
    #[instrument(skip_all, fields(index = %self.config.index))]
    async fn search(&self, query: &QueryDocument) -> Result<Vec<u8>, SearchError> {
        let url = self.search_url();
        let body = self.send(|| self.http.post(&url).json(query.as_value())).await?;
        debug!(bytes = body.len(), "Search response received");
        Ok(body)
    }

    #[instrument(skip_all, fields(index = %self.config.index))]
    async fn bulk(&self, body: String) -> Result<(), SearchError> {
        let url = self.bulk_url();
        let resp = self
            .send(|| {
                self.http
                    .post(&url)
                    .header(CONTENT_TYPE, NDJSON)
                    .body(body.clone())
            })
            .await?;
        check_bulk_response(&resp)
    }

    #[instrument(skip(self, document), fields(index = %self.config.index))]
    async fn index_document(&self, id: i64, document: &Product) -> Result<(), SearchError> {
        let url = self.document_url(id);
        self.send(|| self.http.put(&url).json(document)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(index = %self.config.index))]
    async fn delete_document(&self, id: i64) -> Result<(), SearchError> {
        let url = self.document_url(id);
        self.send(|| self.http.delete(&url)).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Structured {
        #[serde(rename = "type")]
        kind: String,
        reason: Option<String>,
    },
    Message(String),
}

impl ErrorDetail {
    fn describe(&self) -> String {
        match self {
            ErrorDetail::Structured {
                kind,
                reason: Some(reason),
            } => format!("{}: {}", kind, reason),
            ErrorDetail::Structured { kind, reason: None } => kind.clone(),
            ErrorDetail::Message(message) => message.clone(),
        }
    }
}

/// Turn a non-2xx response into a transport error.
///
/// Uses the engine's `error.type: error.reason` when the body carries one,
/// otherwise the (truncated) raw body.
pub fn error_from_body(status: u16, body: &[u8]) -> SearchError {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return SearchError::transport(Some(status), parsed.error.describe());
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    let message = if text.is_empty() {
        "empty response body".to_string()
    } else {
        text.chars().take(MAX_ERROR_BODY).collect()
    };
    SearchError::transport(Some(status), message)
}

/// A bulk request can succeed at the HTTP level and still fail per item.
pub fn check_bulk_response(body: &[u8]) -> Result<(), SearchError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| SearchError::transport(None, format!("unreadable bulk response: {}", e)))?;

    if !value.get("errors").and_then(Value::as_bool).unwrap_or(false) {
        return Ok(());
    }

    let items = value.get("items").and_then(Value::as_array);
    let failed = items
        .into_iter()
        .flatten()
        .filter_map(|item| item.as_object()?.values().next())
        .filter(|op| op.get("error").is_some())
        .collect::<Vec<_>>();

    let message = match failed.first() {
        Some(op) => {
            let id = op.get("_id").and_then(Value::as_str).unwrap_or("?");
            let detail = op
                .get("error")
                .and_then(|e| serde_json::from_value::<ErrorDetail>(e.clone()).ok())
                .map(|d| d.describe())
                .unwrap_or_else(|| "unknown error".to_string());
            format!("{} bulk item(s) failed; first {}: {}", failed.len(), id, detail)
        }
        None => "bulk request reported errors".to_string(),
    };
    let status = failed
        .first()
        .and_then(|op| op.get("status"))
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok());
    Err(SearchError::transport(status, message))
}

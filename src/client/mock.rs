//! Mock transport for testing
//!
//! Serves canned JSON bodies or errors per path and records every call, so
//! tests can assert how many upstream requests were actually made.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::transport::Transport;
use crate::error::ApiError;

/// A captured upstream request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl CapturedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Mock transport.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new()
///     .with_response("/characters", envelope(vec![character(1, "Thor")]))
///     .await;
/// ```
#[derive(Default)]
pub struct MockTransport {
    /// Responses by exact path
    responses: Arc<Mutex<HashMap<String, Result<Value, ApiError>>>>,
    /// Captured requests in call order
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `path`.
    pub async fn with_response(self, path: &str, body: Value) -> Self {
        self.responses
            .lock()
            .await
            .insert(path.to_string(), Ok(body));
        self
    }

    /// Fail every request to `path` with `error`.
    pub async fn with_error(self, path: &str, error: ApiError) -> Self {
        self.responses
            .lock()
            .await
            .insert(path.to_string(), Err(error));
        self
    }

    /// Replace the configured outcome for `path` on a live mock.
    pub async fn set_response(&self, path: &str, outcome: Result<Value, ApiError>) {
        self.responses.lock().await.insert(path.to_string(), outcome);
    }

    /// Total number of upstream calls.
    pub async fn call_count(&self) -> usize {
        self.captured.lock().await.len()
    }

    /// Number of upstream calls to `path`.
    pub async fn calls_to(&self, path: &str) -> usize {
        self.captured
            .lock()
            .await
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    pub async fn captured(&self) -> Vec<CapturedRequest> {
        self.captured.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, ApiError> {
        self.captured.lock().await.push(CapturedRequest {
            path: path.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });

        // Let concurrent callers observe the request as in flight.
        tokio::task::yield_now().await;

        self.responses
            .lock()
            .await
            .get(path)
            .cloned()
            .unwrap_or_else(|| Ok(envelope(Vec::new())))
    }
}

/// Build an upstream success envelope around `results`.
pub fn envelope(results: Vec<Value>) -> Value {
    let count = results.len();
    json!({
        "code": 200,
        "status": "Ok",
        "etag": "mock",
        "data": {
            "offset": 0,
            "limit": 20,
            "total": count,
            "count": count,
            "results": results,
        }
    })
}

/// Envelope with an explicit total, for pagination tests.
pub fn envelope_with_total(results: Vec<Value>, offset: u32, limit: u32, total: u32) -> Value {
    let count = results.len();
    json!({
        "code": 200,
        "status": "Ok",
        "data": {
            "offset": offset,
            "limit": limit,
            "total": total,
            "count": count,
            "results": results,
        }
    })
}

/// Minimal character JSON.
pub fn character(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "modified": "2014-04-29T14:18:17-0400",
        "thumbnail": { "path": format!("http://i.annihil.us/{}", id), "extension": "jpg" },
        "resourceURI": format!("http://gateway.marvel.com/v1/public/characters/{}", id),
        "comics": { "available": 3, "collectionURI": "", "items": [], "returned": 0 },
        "series": { "available": 2, "collectionURI": "", "items": [], "returned": 0 },
        "stories": { "available": 1, "collectionURI": "", "items": [], "returned": 0 },
        "events": { "available": 0, "collectionURI": "", "items": [], "returned": 0 },
        "urls": []
    })
}

/// Minimal comic JSON.
pub fn comic(id: u64, title: &str) -> Value {
    json!({ "id": id, "title": title, "issueNumber": 1, "description": null, "pageCount": 32 })
}

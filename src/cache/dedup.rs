//! In-flight request deduplication
//!
//! Concurrent callers asking for the same fingerprint share one upstream
//! call. The call runs as a spawned task, so it completes (and populates the
//! cache) even if every caller stops waiting.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use log::debug;
use serde_json::Value;

use super::storage::ResponseCache;
use crate::client::clock::Clock;
use crate::error::ApiError;

type SharedResponse = Shared<BoxFuture<'static, Result<Value, ApiError>>>;

/// In-flight call tagged with the id of the task that owns it.
struct PendingCall {
    id: u64,
    response: SharedResponse,
}

type PendingMap = HashMap<String, PendingCall>;
type PendingTable = Mutex<PendingMap>;

fn lock(table: &PendingTable) -> MutexGuard<'_, PendingMap> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Remove `key` only while it still belongs to call `id`. A call forgotten
/// by `clear()` must not evict the call that replaced it.
fn settle(table: &PendingTable, key: &str, id: u64) {
    let mut pending = lock(table);
    if pending.get(key).is_some_and(|call| call.id == id) {
        pending.remove(key);
    }
}

/// Collapses identical concurrent requests and serves fresh cached payloads.
pub struct Deduplicator {
    cache: Arc<ResponseCache>,
    pending: Arc<PendingTable>,
    next_id: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl Deduplicator {
    pub fn new(cache: Arc<ResponseCache>, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
            clock,
        }
    }

    /// Resolve `key` from the cache, an in-flight call, or a new call to
    /// `operation`.
    ///
    /// `operation` is invoked at most once per settlement of `key`. Successful
    /// results are cached; failures are not, so the next caller retries.
    pub async fn run<F, Fut>(&self, key: &str, operation: F) -> Result<Value, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>> + Send + 'static,
    {
        let shared = {
            let mut pending = lock(&self.pending);

            if let Some(hit) = self.cache.get(key, self.clock.now_millis()) {
                debug!("Cache hit: {}", key);
                return Ok(hit);
            }

            match pending.get(key) {
                Some(in_flight) => {
                    debug!("Joining in-flight request: {}", key);
                    in_flight.response.clone()
                }
                None => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let response = self.start(key, id, operation());
                    pending.insert(
                        key.to_string(),
                        PendingCall {
                            id,
                            response: response.clone(),
                        },
                    );
                    response
                }
            }
        };

        shared.await
    }

    /// Spawn the upstream call. Must be called with the pending table locked
    /// so the entry is inserted before the task can remove it.
    fn start<Fut>(&self, key: &str, id: u64, call: Fut) -> SharedResponse
    where
        Fut: Future<Output = Result<Value, ApiError>> + Send + 'static,
    {
        debug!("Starting request: {}", key);

        let cache = Arc::clone(&self.cache);
        let pending = Arc::clone(&self.pending);
        let clock = Arc::clone(&self.clock);
        let owned_key = key.to_string();

        let handle = tokio::spawn(async move {
            let result = call.await;
            if let Ok(ref payload) = result {
                cache.put(&owned_key, payload.clone(), clock.now_millis());
                debug!("Cached {} ({} entries)", owned_key, cache.len());
            }
            settle(&pending, &owned_key, id);
            result
        });

        let pending = Arc::clone(&self.pending);
        let owned_key = key.to_string();
        async move {
            match handle.await {
                Ok(result) => result,
                Err(join_err) => {
                    // The task never reached its own cleanup.
                    settle(&pending, &owned_key, id);
                    Err(ApiError::Network(format!("Request task failed: {}", join_err)))
                }
            }
        }
        .boxed()
        .shared()
    }

    /// Drop every cached response and forget in-flight calls.
    ///
    /// Forgotten calls still run to completion for the callers already
    /// waiting on them.
    pub fn clear(&self) -> usize {
        lock(&self.pending).clear();
        self.cache.clear()
    }

    /// Number of calls currently in flight.
    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        lock(&self.pending).len()
    }
}

//! Character fetch client
//!
//! Every operation first asks the [`BackoffManager`] for permission and fails
//! fast while requests are blocked. Requests then go through the
//! [`Deduplicator`], so identical overlapping calls reach upstream once and
//! fresh responses are served from cache.

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::backoff::{BackoffManager, BlockInfo};
use super::clock::Clock;
use super::filters::CharacterFilters;
use super::models::{ApiResponse, Character, Comic, DataContainer, Event, Series};
use super::transport::Transport;
use super::MarvelApi;
use crate::cache::{Deduplicator, ResponseCache, fingerprint};
use crate::error::{ApiError, ApiResult};

/// Sort applied to a character's comics: newest on-sale date first.
const COMICS_ORDER: &str = "-onsaleDate";

/// Sort applied to a character's series: latest start year first.
const SERIES_ORDER: &str = "-startYear";

/// Marvel API client with caching, deduplication and backoff.
pub struct MarvelClient {
    transport: Arc<dyn Transport>,
    backoff: Arc<BackoffManager>,
    dedup: Deduplicator,
}

impl MarvelClient {
    /// Assemble a client from already constructed parts.
    pub fn new(
        transport: Arc<dyn Transport>,
        backoff: Arc<BackoffManager>,
        dedup: Deduplicator,
    ) -> Self {
        Self {
            transport,
            backoff,
            dedup,
        }
    }

    /// Build a client with a fresh cache and backoff manager on `clock`.
    pub fn with_clock(transport: Arc<dyn Transport>, clock: Arc<dyn Clock>) -> Self {
        let cache = Arc::new(ResponseCache::new());
        let backoff = Arc::new(BackoffManager::new(Arc::clone(&clock)));
        let dedup = Deduplicator::new(cache, clock);
        Self::new(transport, backoff, dedup)
    }

    /// Shared backoff manager, e.g. to subscribe to block events.
    pub fn backoff(&self) -> &Arc<BackoffManager> {
        &self.backoff
    }

    /// Drop cached responses and forget in-flight calls.
    pub fn clear_cache(&self) -> usize {
        self.dedup.clear()
    }

    fn ensure_available(&self) -> ApiResult<()> {
        if self.backoff.can_make_request() {
            Ok(())
        } else {
            Err(self.backoff.blocked_error())
        }
    }

    /// Deduplicated, validated GET.
    ///
    /// The body is validated inside the shared call so a malformed response
    /// counts as a failure and is never cached.
    async fn fetch<T>(
        &self,
        path: String,
        params: Vec<(&'static str, String)>,
    ) -> ApiResult<ApiResponse<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let key = {
            let params_ref: Vec<(&str, &str)> =
                params.iter().map(|(k, v)| (*k, v.as_str())).collect();
            fingerprint(&path, &params_ref)
        };

        let transport = Arc::clone(&self.transport);
        let backoff = Arc::clone(&self.backoff);

        let body = self
            .dedup
            .run(&key, move || async move {
                let result = transport
                    .get(&path, &params)
                    .await
                    .and_then(|body| validate::<T>(&body).map(|_| body));

                match &result {
                    Ok(_) => backoff.on_success(),
                    Err(err) => backoff.on_failure(err),
                }
                result
            })
            .await?;

        parse(body)
    }

    /// Shared path for comics/series/events lookups.
    async fn fetch_related<T>(
        &self,
        id: u64,
        collection: &str,
        limit: u32,
        order: Option<&str>,
    ) -> ApiResult<DataContainer<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.ensure_available()?;

        let mut params = vec![("limit", limit.to_string())];
        if let Some(order) = order {
            params.push(("orderBy", order.to_string()));
        }

        let path = format!("/characters/{}/{}", id, collection);
        match self.fetch::<T>(path, params).await {
            Ok(response) => Ok(response.data),
            Err(err) => {
                warn!("Error fetching character {} {}: {}", id, collection, err);
                Ok(DataContainer::empty())
            }
        }
    }
}

fn validate<T: DeserializeOwned>(body: &Value) -> ApiResult<()> {
    ApiResponse::<T>::deserialize(body)
        .map(|_| ())
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

fn parse<T: DeserializeOwned>(body: Value) -> ApiResult<ApiResponse<T>> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

#[async_trait]
impl MarvelApi for MarvelClient {
    async fn list_characters(
        &self,
        offset: u32,
        limit: u32,
        filters: &CharacterFilters,
    ) -> ApiResult<ApiResponse<Character>> {
        self.ensure_available()?;

        let params = filters.to_query_params(offset, limit);
        self.fetch("/characters".to_string(), params).await
    }

    async fn get_character(&self, id: u64) -> ApiResult<Option<Character>> {
        self.ensure_available()?;

        let path = format!("/characters/{}", id);
        match self.fetch::<Character>(path, Vec::new()).await {
            Ok(response) => Ok(response.data.results.into_iter().next()),
            // Upstream answers unknown ids with 404 rather than an empty page
            Err(ApiError::ServerError { status: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn get_character_comics(&self, id: u64, limit: u32) -> ApiResult<DataContainer<Comic>> {
        self.fetch_related(id, "comics", limit, Some(COMICS_ORDER))
            .await
    }

    async fn get_character_series(
        &self,
        id: u64,
        limit: u32,
    ) -> ApiResult<DataContainer<Series>> {
        self.fetch_related(id, "series", limit, Some(SERIES_ORDER))
            .await
    }

    async fn get_character_events(&self, id: u64, limit: u32) -> ApiResult<DataContainer<Event>> {
        self.fetch_related(id, "events", limit, None).await
    }

    fn is_api_available(&self) -> bool {
        self.backoff.can_make_request()
    }

    fn block_info(&self) -> BlockInfo {
        self.backoff.block_info()
    }
}

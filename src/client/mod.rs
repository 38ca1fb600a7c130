//! Marvel API client
//!
//! The [`MarvelApi`] trait is the public surface. [`MarvelClient`] implements
//! it by composing the request signer, the response cache and deduplicator,
//! and the backoff manager on top of a [`Transport`].

use async_trait::async_trait;

use crate::error::ApiResult;

pub mod backoff;
pub mod clock;
pub mod filters;
pub mod marvel;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod signer;
pub mod transport;

pub use backoff::{BackoffManager, BlockEvent, BlockInfo};
pub use clock::{Clock, SystemClock};
pub use filters::{CharacterFilters, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, OrderBy};
pub use marvel::MarvelClient;
#[cfg(test)]
pub use mock::MockTransport;
pub use models::{ApiResponse, Character, Comic, DataContainer, Event, Series};
pub use signer::Credentials;
pub use transport::{HttpTransport, Transport};

/// Character fetch operations.
#[async_trait]
pub trait MarvelApi: Send + Sync {
    /// List characters with paging and filters.
    async fn list_characters(
        &self,
        offset: u32,
        limit: u32,
        filters: &CharacterFilters,
    ) -> ApiResult<ApiResponse<Character>>;

    /// Look up one character. `Ok(None)` when upstream has no such id.
    async fn get_character(&self, id: u64) -> ApiResult<Option<Character>>;

    /// Latest comics featuring the character. Degrades to an empty page on
    /// upstream failure.
    async fn get_character_comics(&self, id: u64, limit: u32) -> ApiResult<DataContainer<Comic>>;

    /// Series featuring the character, newest first. Degrades like comics.
    async fn get_character_series(&self, id: u64, limit: u32)
    -> ApiResult<DataContainer<Series>>;

    /// Events featuring the character. Degrades like comics.
    async fn get_character_events(&self, id: u64, limit: u32) -> ApiResult<DataContainer<Event>>;

    /// Whether requests are currently permitted.
    fn is_api_available(&self) -> bool;

    /// Current block state for display.
    fn block_info(&self) -> BlockInfo;
}

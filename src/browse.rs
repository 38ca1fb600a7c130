//! Paged character browsing
//!
//! [`HeroBrowser`] keeps the current search, sort and page between calls, so
//! a caller can page through results or change the sort without rebuilding
//! the query each time.
//!
//! [`LocalView`] narrows and reorders a page that was already fetched. Unlike
//! the upstream name-prefix search it also matches descriptions.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use log::debug;
use serde::Serialize;

use crate::client::models::{Character, DEFAULT_IMAGE_SIZE, Image};
use crate::client::{CharacterFilters, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MarvelApi, OrderBy};
use crate::error::{ApiError, ApiResult};

/// Active browse filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeroFilters {
    /// Name prefix, already trimmed
    pub search: Option<String>,
    pub order_by: OrderBy,
    /// Only characters appearing in this comic
    pub comic: Option<u64>,
    /// Only characters appearing in this series
    pub series: Option<u64>,
    /// Only characters appearing in this event
    pub event: Option<u64>,
}

impl HeroFilters {
    fn to_character_filters(&self) -> CharacterFilters {
        let mut filters = CharacterFilters::new().order_by(self.order_by);
        if let Some(ref term) = self.search {
            filters = filters.search(term.clone());
        }
        if let Some(id) = self.comic {
            filters = filters.comics(id);
        }
        if let Some(id) = self.series {
            filters = filters.series(id);
        }
        if let Some(id) = self.event {
            filters = filters.events(id);
        }
        filters
    }
}

/// Where the browser is in the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    /// 1-based page number
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_items: u32,
    pub total_pages: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_per_page: DEFAULT_PAGE_SIZE,
            total_items: 0,
            total_pages: 0,
        }
    }
}

impl PaginationState {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// One fetched page.
#[derive(Debug, Clone, Serialize)]
pub struct HeroPage {
    pub heroes: Vec<Character>,
    pub pagination: PaginationState,
}

/// Stateful character browser over any [`MarvelApi`].
pub struct HeroBrowser<A: MarvelApi + ?Sized> {
    api: Arc<A>,
    filters: HeroFilters,
    pagination: PaginationState,
}

impl<A: MarvelApi + ?Sized> HeroBrowser<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            filters: HeroFilters::default(),
            pagination: PaginationState::default(),
        }
    }

    /// Use `per_page` results per page, clamped to what upstream accepts.
    pub fn with_page_size(mut self, per_page: u32) -> Self {
        self.pagination.items_per_page = per_page.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Start from `filters` instead of the defaults.
    pub fn with_filters(mut self, mut filters: HeroFilters) -> Self {
        filters.search = normalize_search(filters.search.as_deref());
        self.filters = filters;
        self
    }

    pub fn filters(&self) -> &HeroFilters {
        &self.filters
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Fetch a 1-based page with the current filters.
    ///
    /// Fails without contacting upstream while requests are blocked. The
    /// pagination state is only updated on success.
    pub async fn fetch_heroes(&mut self, page: u32) -> ApiResult<HeroPage> {
        if !self.api.is_api_available() {
            return Err(self.unavailable());
        }

        let page = page.max(1);
        let per_page = self.pagination.items_per_page;
        let offset = (page - 1).saturating_mul(per_page);

        debug!(
            "Fetching heroes page {} (offset {}, filters {:?})",
            page, offset, self.filters
        );

        let response = self
            .api
            .list_characters(offset, per_page, &self.filters.to_character_filters())
            .await?;

        let total = response.data.total;
        self.pagination = PaginationState {
            current_page: page,
            items_per_page: per_page,
            total_items: total,
            total_pages: total.div_ceil(per_page),
        };

        Ok(HeroPage {
            heroes: response.data.results,
            pagination: self.pagination,
        })
    }

    /// Set the name search and go back to page 1. Blank terms clear it.
    pub async fn search_heroes(&mut self, term: &str) -> ApiResult<HeroPage> {
        self.filters.search = normalize_search(Some(term));
        self.fetch_heroes(1).await
    }

    /// Change the sort and go back to page 1.
    pub async fn sort_heroes(&mut self, order_by: OrderBy) -> ApiResult<HeroPage> {
        self.filters.order_by = order_by;
        self.fetch_heroes(1).await
    }

    /// Restore default filters and go back to page 1.
    pub async fn reset_filters(&mut self) -> ApiResult<HeroPage> {
        self.filters = HeroFilters::default();
        self.fetch_heroes(1).await
    }

    fn unavailable(&self) -> ApiError {
        let info = self.api.block_info();
        ApiError::UpstreamTemporarilyBlocked {
            reason: info
                .reason
                .unwrap_or_else(|| "Too many requests".to_string()),
            until: info.unblock_at.unwrap_or_else(Utc::now),
        }
    }
}

fn normalize_search(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Client-side ordering of a fetched page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocalSort {
    /// Keep upstream order
    #[default]
    Default,
    /// Name, A-Z ignoring case
    Asc,
    /// Name, Z-A ignoring case
    Desc,
}

/// Heroes whose name or description contains `term`, ignoring case.
///
/// The term is trimmed. A blank term matches everything.
pub fn local_search(heroes: &[Character], term: &str) -> Vec<Character> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return heroes.to_vec();
    }

    heroes
        .iter()
        .filter(|hero| {
            hero.name.to_lowercase().contains(&term)
                || hero.description.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Reorder `heroes` by name. The sort is stable, so ties keep upstream order.
pub fn local_sort(mut heroes: Vec<Character>, order: LocalSort) -> Vec<Character> {
    match order {
        LocalSort::Default => {}
        LocalSort::Asc => heroes.sort_by_cached_key(|hero| hero.name.to_lowercase()),
        LocalSort::Desc => heroes.sort_by_cached_key(|hero| Reverse(hero.name.to_lowercase())),
    }
    heroes
}

/// Local search term and ordering applied on top of a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalView {
    /// Trimmed search term, `None` when blank
    pub term: Option<String>,
    pub sort: LocalSort,
}

impl LocalView {
    pub fn new(term: Option<&str>, sort: LocalSort) -> Self {
        Self {
            term: normalize_search(term),
            sort,
        }
    }

    /// Whether the view hides any heroes.
    pub fn is_filtering(&self) -> bool {
        self.term.is_some()
    }

    /// Filter then sort `heroes`.
    pub fn apply(&self, heroes: &[Character]) -> Vec<Character> {
        let matched = local_search(heroes, self.term.as_deref().unwrap_or(""));
        local_sort(matched, self.sort)
    }
}

/// Image URL for a thumbnail, or `None` when the character has none.
///
/// `size` defaults to `standard_xlarge`.
pub fn image_url(thumbnail: Option<&Image>, size: Option<&str>) -> Option<String> {
    thumbnail.map(|image| image.url(size.unwrap_or(DEFAULT_IMAGE_SIZE)))
}

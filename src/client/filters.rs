//! Character list filters
//!
//! Builds the query parameters for `GET /characters` from paging and filter
//! options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default page size for character listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size upstream accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort key accepted by the character listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderBy {
    /// Name, A-Z
    #[default]
    #[serde(rename = "name")]
    Name,
    /// Name, Z-A
    #[serde(rename = "-name")]
    NameDesc,
    /// Oldest modification first
    #[serde(rename = "modified")]
    Modified,
    /// Most recently modified first
    #[serde(rename = "-modified")]
    ModifiedDesc,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Name => "name",
            OrderBy::NameDesc => "-name",
            OrderBy::Modified => "modified",
            OrderBy::ModifiedDesc => "-modified",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(OrderBy::Name),
            "-name" => Ok(OrderBy::NameDesc),
            "modified" => Ok(OrderBy::Modified),
            "-modified" => Ok(OrderBy::ModifiedDesc),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

/// Filters for listing characters.
///
/// # Example
/// ```ignore
/// let filters = CharacterFilters::new()
///     .search("spider")
///     .order_by(OrderBy::ModifiedDesc);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFilters {
    /// Free-text search, sent as a name prefix
    pub search: Option<String>,
    /// Explicit name prefix
    pub name_starts_with: Option<String>,
    pub order_by: Option<OrderBy>,
    /// Only characters appearing in this comic
    pub comics: Option<u64>,
    /// Only characters appearing in this series
    pub series: Option<u64>,
    /// Only characters appearing in this event
    pub events: Option<u64>,
}

impl CharacterFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn name_starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.name_starts_with = Some(prefix.into());
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    pub fn comics(mut self, id: u64) -> Self {
        self.comics = Some(id);
        self
    }

    pub fn series(mut self, id: u64) -> Self {
        self.series = Some(id);
        self
    }

    pub fn events(mut self, id: u64) -> Self {
        self.events = Some(id);
        self
    }

    /// Convert paging and filters to query parameters.
    ///
    /// Blank strings are skipped. When both `search` and `name_starts_with`
    /// are set, `search` wins.
    pub fn to_query_params(&self, offset: u32, limit: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![("offset", offset.to_string()), ("limit", limit.to_string())];

        let prefix = non_blank(self.search.as_deref())
            .or_else(|| non_blank(self.name_starts_with.as_deref()));
        if let Some(prefix) = prefix {
            params.push(("nameStartsWith", prefix.to_string()));
        }

        if let Some(order) = self.order_by {
            params.push(("orderBy", order.as_str().to_string()));
        }

        if let Some(id) = self.comics {
            params.push(("comics", id.to_string()));
        }
        if let Some(id) = self.series {
            params.push(("series", id.to_string()));
        }
        if let Some(id) = self.events {
            params.push(("events", id.to_string()));
        }

        params
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

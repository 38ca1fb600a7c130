//! Common CLI types shared across commands

use crate::browse::LocalSort;
use crate::client::OrderBy;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - colored, human-oriented layout
    #[default]
    Pretty,
    /// Table format - one row per entry
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s, true)
    }
}

/// Character sort keys, matching upstream `orderBy` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    /// Name, A-Z
    #[value(name = "name")]
    Name,
    /// Name, Z-A
    #[value(name = "-name")]
    NameDesc,
    /// Least recently modified first
    #[value(name = "modified")]
    Modified,
    /// Most recently modified first
    #[value(name = "-modified")]
    ModifiedDesc,
}

impl From<SortKey> for OrderBy {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => OrderBy::Name,
            SortKey::NameDesc => OrderBy::NameDesc,
            SortKey::Modified => OrderBy::Modified,
            SortKey::ModifiedDesc => OrderBy::ModifiedDesc,
        }
    }
}

/// Ordering applied to an already fetched page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LocalSortKey {
    /// Keep upstream order
    #[default]
    Default,
    /// Name, A-Z
    Asc,
    /// Name, Z-A
    Desc,
}

impl From<LocalSortKey> for LocalSort {
    fn from(key: LocalSortKey) -> Self {
        match key {
            LocalSortKey::Default => LocalSort::Default,
            LocalSortKey::Asc => LocalSort::Asc,
            LocalSortKey::Desc => LocalSort::Desc,
        }
    }
}

//! Display model implementations for table, pretty and JSON output

mod character;
mod related;

pub use character::{CharacterDetail, CharacterDisplay};
pub use related::{ComicDisplay, EventDisplay, SeriesDisplay};

/// Date part of an upstream timestamp such as `2014-04-29T14:18:17-0400`.
pub(crate) fn date_only(timestamp: &str) -> String {
    timestamp
        .split(['T', ' '])
        .next()
        .filter(|d| !d.is_empty() && !d.starts_with("-0001"))
        .unwrap_or("-")
        .to_string()
}

//! Comics, series and events a character appears in

use serde::{Deserialize, Serialize};

use super::character::{Image, null_as_empty};

/// Comic issue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comic {
    pub id: u64,

    pub title: String,

    #[serde(default)]
    pub issue_number: f64,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    #[serde(default)]
    pub page_count: u32,

    #[serde(default)]
    pub thumbnail: Option<Image>,
}

/// Comic series
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: u64,

    pub title: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    #[serde(default)]
    pub start_year: Option<i32>,

    #[serde(default)]
    pub end_year: Option<i32>,

    /// Age rating, often empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rating: String,

    #[serde(default)]
    pub thumbnail: Option<Image>,
}

/// Crossover event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,

    pub title: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// Start date (`YYYY-MM-DD hh:mm:ss`)
    #[serde(default)]
    pub start: Option<String>,

    #[serde(default)]
    pub end: Option<String>,

    #[serde(default)]
    pub thumbnail: Option<Image>,
}

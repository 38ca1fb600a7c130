//! Character models

use serde::{Deserialize, Serialize};

/// Marvel character resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Character ID
    pub id: u64,

    /// Character name
    pub name: String,

    /// Short bio, often empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// Last modification date as sent by upstream
    #[serde(default)]
    pub modified: String,

    #[serde(default)]
    pub thumbnail: Option<Image>,

    #[serde(default, rename = "resourceURI")]
    pub resource_uri: String,

    #[serde(default)]
    pub comics: ResourceList,

    #[serde(default)]
    pub series: ResourceList,

    #[serde(default)]
    pub stories: ResourceList,

    #[serde(default)]
    pub events: ResourceList,

    #[serde(default)]
    pub urls: Vec<Link>,
}

/// Image reference; combine with a size variant to get a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub path: String,
    pub extension: String,
}

/// Default image variant used for thumbnails.
pub const DEFAULT_IMAGE_SIZE: &str = "standard_xlarge";

impl Image {
    /// Full URL for a size variant such as `portrait_uncanny`.
    pub fn url(&self, size: &str) -> String {
        format!("{}/{}.{}", self.path, size, self.extension)
    }
}

/// Count and first few entries of an associated collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList {
    /// Total number of associated resources
    #[serde(default)]
    pub available: u32,

    #[serde(default, rename = "collectionURI")]
    pub collection_uri: String,

    #[serde(default)]
    pub items: Vec<ResourceSummary>,

    /// Number of entries in `items`
    #[serde(default)]
    pub returned: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSummary {
    #[serde(default, rename = "resourceURI")]
    pub resource_uri: String,

    pub name: String,

    /// Story type (cover, interiorStory); stories only
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Public web link (detail, wiki, comiclink)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// Treat an explicit `null` string as empty.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

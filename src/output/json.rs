//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

use crate::browse::PaginationState;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// RFC 3339 time the output was produced
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Paging position, for paged listings only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationState>,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                pagination: None,
            },
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationState) -> Self {
        self.meta.pagination = Some(pagination);
        self
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Format a page of data with its pagination in `meta`
pub fn format_json_page<T: Serialize + ?Sized>(
    data: &T,
    pagination: PaginationState,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data).with_pagination(pagination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[derive(Debug, Serialize)]
    struct Hero {
        id: u64,
        name: &'static str,
    }

    #[test]
    fn test_envelope_shape() {
        let out = format_json(&[Hero {
            id: 1009610,
            name: "Spider-Man",
        }])
        .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["data"][0]["name"], "Spider-Man");
        assert_eq!(parsed["meta"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(parsed["meta"]["timestamp"].is_string());
        assert!(parsed["meta"].get("pagination").is_none());
    }

    #[test]
    fn test_empty_data() {
        let heroes: Vec<Hero> = vec![];
        let out = format_json(&heroes).unwrap();
        assert!(out.contains("\"data\": []"));
    }

    #[test]
    fn test_page_meta() {
        let pagination = PaginationState {
            current_page: 2,
            items_per_page: 20,
            total_items: 45,
            total_pages: 3,
        };
        let out = format_json_page(&Vec::<Hero>::new(), pagination).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["meta"]["pagination"]["current_page"], 2);
        assert_eq!(parsed["meta"]["pagination"]["total_pages"], 3);
    }
}

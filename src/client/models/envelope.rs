//! Response envelope shared by every Marvel API endpoint

use serde::{Deserialize, Serialize};

/// Top-level response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// HTTP status code echoed by upstream
    pub code: u16,

    /// Human-readable status ("Ok" on success)
    #[serde(default)]
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Result page
    pub data: DataContainer<T>,
}

/// One page of results plus paging echo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataContainer<T> {
    #[serde(default)]
    pub offset: u32,

    #[serde(default)]
    pub limit: u32,

    /// Total matching resources across all pages
    #[serde(default)]
    pub total: u32,

    /// Number of results in this page
    #[serde(default)]
    pub count: u32,

    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for DataContainer<T> {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 0,
            total: 0,
            count: 0,
            results: Vec::new(),
        }
    }
}

impl<T> DataContainer<T> {
    /// Empty page, used when a supplementary lookup degrades.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Error body returned with non-2xx responses.
///
/// Upstream is inconsistent: some errors carry `status`, others `message`,
/// and `code` may be a number or a string such as `"InvalidCredentials"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<serde_json::Value>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best available description of the failure.
    pub fn text(&self) -> Option<&str> {
        self.status.as_deref().or(self.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_envelope() {
        let json = r#"{
            "code": 200,
            "status": "Ok",
            "attributionText": "Data provided by Marvel. © 2024 MARVEL",
            "etag": "abc",
            "data": { "offset": 0, "limit": 20, "total": 1562, "count": 2, "results": [1, 2] }
        }"#;

        let resp: ApiResponse<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.code, 200);
        assert_eq!(resp.data.total, 1562);
        assert_eq!(resp.data.results, vec![1, 2]);
        assert_eq!(resp.etag.as_deref(), Some("abc"));
    }

    #[test]
    fn test_data_container_defaults_missing_fields() {
        let container: DataContainer<u32> = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(container.is_empty());
        assert_eq!(container.total, 0);
    }

    #[test]
    fn test_error_body_prefers_status() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"code": "MissingParameter", "message": "You must provide a hash."}"#)
                .unwrap();
        assert_eq!(body.text(), Some("You must provide a hash."));

        let body: ErrorBody =
            serde_json::from_str(r#"{"code": 409, "status": "Missing API key"}"#).unwrap();
        assert_eq!(body.text(), Some("Missing API key"));
    }
}

//! HTTP transport for the Marvel API
//!
//! Signs each request, enforces the request timeout and turns upstream
//! failures into classified [`ApiError`]s.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;

use super::clock::Clock;
use super::models::ErrorBody;
use super::signer::{Credentials, sign};
use crate::error::ApiError;

/// Marvel public API base URL
pub const API_BASE_URL: &str = "https://gateway.marvel.com/v1/public";

/// Upper bound for a single request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Raw GET access to the upstream API.
///
/// Implementations return the decoded JSON body on success. Cache and backoff
/// logic live above this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, params: &[(&'static str, String)])
    -> Result<Value, ApiError>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    http: HttpClient,
    base_url: String,
    credentials: Credentials,
    clock: Arc<dyn Clock>,
}

impl HttpTransport {
    /// Create a transport against the production API.
    pub fn new(credentials: Credentials, clock: Arc<dyn Clock>) -> Result<Self, ApiError> {
        Self::with_host(credentials, clock, None)
    }

    /// Create a transport with an optional custom base URL (for testing).
    pub fn with_host(
        credentials: Credentials,
        clock: Arc<dyn Clock>,
        base_url: Option<String>,
    ) -> Result<Self, ApiError> {
        Self::with_timeout(credentials, clock, base_url, REQUEST_TIMEOUT)
    }

    fn with_timeout(
        credentials: Credentials,
        clock: Arc<dyn Clock>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| API_BASE_URL.to_string());

        debug!(
            "Marvel API transport at {} with key {}",
            base_url,
            credentials.redacted_public_key()
        );

        Ok(Self {
            http,
            base_url,
            credentials,
            clock,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, ApiError> {
        let auth = sign(
            self.clock.now_millis(),
            &self.credentials.public_key,
            &self.credentials.private_key,
        );

        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", path);

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&auth.to_query_params())
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status.is_success() {
            // Timeouts while reading the body stay timeouts
            return response.json::<Value>().await.map_err(ApiError::from);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, &body))
    }
}

/// Map a non-success response onto the error taxonomy.
///
/// Upstream does not return structured error codes for every case, so the
/// 401 and 409 bodies are matched on their text.
pub fn classify_status(status: StatusCode, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let text = parsed.text().unwrap_or("").to_string();

    match status {
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(
            "Rate limit exceeded. Please wait before making more requests.".to_string(),
        ),
        StatusCode::CONFLICT => {
            let reason = if text.contains("Missing API key") {
                "API key is missing. Please check your configuration.".to_string()
            } else if text.contains("Missing hash") {
                "Hash parameter is missing. Server-side authentication required.".to_string()
            } else if text.contains("Missing timestamp") {
                "Timestamp parameter is missing. Server-side authentication required.".to_string()
            } else if text.is_empty() {
                "Authentication error: Authentication parameter missing".to_string()
            } else {
                format!("Authentication error: {}", text)
            };
            ApiError::AuthParameterMissing(reason)
        }
        StatusCode::UNAUTHORIZED => {
            let reason = if text.contains("Invalid referrer") {
                "Invalid referrer. Add this host to the authorized referrers in the Marvel Developer Portal."
            } else if text.contains("Invalid hash") {
                "Invalid hash. Please check your private key configuration."
            } else {
                "Invalid API credentials. Please check your Marvel API keys."
            };
            ApiError::InvalidCredentials(reason.to_string())
        }
        StatusCode::FORBIDDEN => ApiError::Forbidden(
            "Access forbidden. Your API keys may not have permission for this endpoint."
                .to_string(),
        ),
        StatusCode::METHOD_NOT_ALLOWED => {
            ApiError::MethodNotAllowed("HTTP method not allowed for this endpoint.".to_string())
        }
        _ => {
            let message = if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected status")
                    .to_string()
            } else {
                text
            };
            ApiError::ServerError {
                status: status.as_u16(),
                message,
            }
        }
    }
}

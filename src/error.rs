//! Error types for heroscope

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::client::backoff::FailureKind;

/// Result type alias for heroscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for upstream API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Upstream API errors.
///
/// Cloneable so that every caller joined on one in-flight request observes
/// the same failure.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    RateLimited(String),

    #[error("{0}")]
    AuthParameterMissing(String),

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("API temporarily unavailable: {reason} (retry after {})", .until.format("%H:%M:%S"))]
    UpstreamTemporarilyBlocked {
        reason: String,
        until: DateTime<Utc>,
    },
}

impl ApiError {
    /// Backoff classification of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::RateLimited(_) => FailureKind::RateLimited,
            ApiError::AuthParameterMissing(_) => FailureKind::AuthParameterMissing,
            ApiError::InvalidCredentials(_) => FailureKind::InvalidCredentials,
            ApiError::Forbidden(_) => FailureKind::Forbidden,
            ApiError::MethodNotAllowed(_) => FailureKind::MethodNotAllowed,
            ApiError::Timeout => FailureKind::Timeout,
            ApiError::Network(_) => FailureKind::Network,
            ApiError::ServerError { .. } | ApiError::InvalidResponse(_) => FailureKind::Other,
            ApiError::UpstreamTemporarilyBlocked { .. } => FailureKind::Blocked,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `heroscope init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Marvel public key not configured. Run `heroscope init` or set MARVEL_PUBLIC_KEY.")]
    MissingPublicKey,

    #[error("Marvel private key not configured. Run `heroscope init` or set MARVEL_PRIVATE_KEY.")]
    MissingPrivateKey,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_rate_limited_message() {
        let err = ApiError::RateLimited("Rate limit exceeded.".to_string());
        assert!(err.to_string().contains("Rate limit"));
    }

    #[test]
    fn test_api_error_server_error() {
        let err = ApiError::ServerError {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("Service Unavailable"));
    }

    #[test]
    fn test_api_error_blocked_carries_reason() {
        let until = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let err = ApiError::UpstreamTemporarilyBlocked {
            reason: "Too many consecutive errors (3).".to_string(),
            until,
        };
        let msg = err.to_string();
        assert!(msg.contains("temporarily unavailable"));
        assert!(msg.contains("Too many consecutive errors"));
    }

    #[test]
    fn test_api_error_kinds() {
        assert_eq!(
            ApiError::RateLimited(String::new()).kind(),
            FailureKind::RateLimited
        );
        assert_eq!(
            ApiError::Forbidden(String::new()).kind(),
            FailureKind::Forbidden
        );
        assert_eq!(ApiError::Timeout.kind(), FailureKind::Timeout);
        assert_eq!(
            ApiError::ServerError {
                status: 500,
                message: String::new()
            }
            .kind(),
            FailureKind::Other
        );
        assert!(ApiError::InvalidCredentials(String::new()).kind().is_hard());
        assert!(!ApiError::Network(String::new()).kind().is_hard());
    }

    #[test]
    fn test_config_error_missing_keys() {
        assert!(ConfigError::MissingPublicKey.to_string().contains("MARVEL_PUBLIC_KEY"));
        assert!(
            ConfigError::MissingPrivateKey
                .to_string()
                .contains("MARVEL_PRIVATE_KEY")
        );
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::Timeout.into();

        match err {
            Error::Api(ApiError::Timeout) => (),
            _ => panic!("Expected Error::Api(ApiError::Timeout)"),
        }
    }

    #[test]
    fn test_error_from_config_error() {
        let err: Error = ConfigError::NotFound.into();

        match err {
            Error::Config(ConfigError::NotFound) => (),
            _ => panic!("Expected Error::Config(ConfigError::NotFound)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}

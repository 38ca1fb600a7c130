//! Configuration management for heroscope

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::client::signer::Credentials;
use crate::client::DEFAULT_PAGE_SIZE;
use crate::error::{ConfigError, Result};

/// Environment variable overriding the configured public key
pub const ENV_PUBLIC_KEY: &str = "MARVEL_PUBLIC_KEY";

/// Environment variable overriding the configured private key
pub const ENV_PRIVATE_KEY: &str = "MARVEL_PRIVATE_KEY";

/// Environment variable overriding the API host
pub const ENV_API_HOST: &str = "HEROSCOPE_API_HOST";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Marvel public API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Marvel private API key, used only for request signing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    /// Alternative API base URL (testing or proxies)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default number of characters per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".heroscope").join("config.yaml"))
    }

    /// Resolve an optional override path to a concrete file
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path`, or the default path when `None`
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load the file if present, otherwise start empty, then apply
    /// environment overrides.
    pub fn load_effective(path: Option<&str>) -> Result<Self> {
        let mut config = match Self::load_at(path) {
            Ok(config) => config,
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Self::default(),
            Err(e) => return Err(e),
        };
        config.apply_env();
        Ok(config)
    }

    /// Save configuration to `path`, or the default path when `None`
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Keys are secrets; owner-only on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Override fields from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Override fields from `lookup`. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_PUBLIC_KEY) {
            self.public_key = Some(key);
        }
        if let Some(key) = get(ENV_PRIVATE_KEY) {
            self.private_key = Some(key);
        }
        if let Some(host) = get(ENV_API_HOST) {
            self.api_host = Some(host);
        }
    }

    /// Validate that both signing keys are present
    pub fn validate_auth(&self) -> Result<()> {
        if is_blank(&self.public_key) {
            return Err(ConfigError::MissingPublicKey.into());
        }
        if is_blank(&self.private_key) {
            return Err(ConfigError::MissingPrivateKey.into());
        }
        Ok(())
    }

    /// Signing credentials, after validation
    pub fn credentials(&self) -> Result<Credentials> {
        self.validate_auth()?;
        Ok(Credentials::new(
            self.public_key.clone().unwrap_or_default(),
            self.private_key.clone().unwrap_or_default(),
        ))
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).is_none_or(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn keyed() -> Config {
        Config {
            public_key: Some("pub1234".to_string()),
            private_key: Some("priv5678".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.public_key.is_none());
        assert!(config.private_key.is_none());
        assert!(config.api_host.is_none());
        assert_eq!(config.preferences.page_size, 20);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let path_str = path.to_str().unwrap();

        let mut config = keyed();
        config.preferences.format = Some("json".to_string());
        config.save_at(Some(path_str)).unwrap();

        let loaded = Config::load_at(Some(path_str)).unwrap();
        assert_eq!(loaded.public_key.as_deref(), Some("pub1234"));
        assert_eq!(loaded.private_key.as_deref(), Some("priv5678"));
        assert_eq!(loaded.preferences.format.as_deref(), Some("json"));
        assert_eq!(loaded.preferences.page_size, 20);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        keyed().save_to(path.clone()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");

        match Config::load_from(path) {
            Err(Error::Config(ConfigError::NotFound)) => (),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "public_key: [unterminated").unwrap();

        match Config::load_from(path) {
            Err(Error::Config(ConfigError::ParseError(_))) => (),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides_win_over_file() {
        let env: HashMap<&str, &str> = [
            (ENV_PUBLIC_KEY, "env-pub"),
            (ENV_PRIVATE_KEY, "  "),
            (ENV_API_HOST, "http://localhost:9999"),
        ]
        .into_iter()
        .collect();

        let mut config = keyed();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.public_key.as_deref(), Some("env-pub"));
        // Blank override ignored
        assert_eq!(config.private_key.as_deref(), Some("priv5678"));
        assert_eq!(config.api_host.as_deref(), Some("http://localhost:9999"));
    }

    #[test]
    fn test_validate_auth() {
        assert!(keyed().validate_auth().is_ok());

        let mut config = keyed();
        config.public_key = None;
        match config.validate_auth() {
            Err(Error::Config(ConfigError::MissingPublicKey)) => (),
            other => panic!("Expected MissingPublicKey, got {:?}", other),
        }

        let mut config = keyed();
        config.private_key = Some(" ".to_string());
        match config.validate_auth() {
            Err(Error::Config(ConfigError::MissingPrivateKey)) => (),
            other => panic!("Expected MissingPrivateKey, got {:?}", other),
        }
    }

    #[test]
    fn test_credentials() {
        let creds = keyed().credentials().unwrap();
        assert_eq!(creds.public_key, "pub1234");
        assert_eq!(creds.private_key, "priv5678");

        assert!(Config::default().credentials().is_err());
    }
}

//! # Client Configuration
//!
//! Base URL and timeout for the remote collaborator.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Configuration Resolution                               │
//! │                                                                         │
//! │  1. Environment        DUKKAN_API_URL, DUKKAN_API_TIMEOUT_SECS          │
//! │         │ (wins)                                                        │
//! │         ▼                                                               │
//! │  2. Config file        <config dir>/dukkan/client.toml                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. Built-in default   http://127.0.0.1:8000/api, 30s                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Default collaborator base URL, matching a local development server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto.
    pub base_url: Url,

    /// Per-request timeout. Expired requests surface as
    /// [`ClientError::Timeout`] and are never retried.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// The optional on-disk config file shape. Every field is optional so a
/// partial file overrides only what it names.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Loads configuration from the standard locations.
    ///
    /// Environment variables override the config file, which overrides
    /// the built-in defaults. A missing file is not an error; a present
    /// but malformed file is.
    pub fn load() -> ClientResult<Self> {
        let file = match Self::config_path() {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::InvalidConfig(format!("{}: {e}", path.display())))?;
                let parsed: FileConfig = toml::from_str(&raw)
                    .map_err(|e| ClientError::InvalidConfig(format!("{}: {e}", path.display())))?;
                debug!(path = %path.display(), "Loaded client config file");
                parsed
            }
            _ => FileConfig::default(),
        };

        Self::from_sources(
            std::env::var("DUKKAN_API_URL").ok(),
            std::env::var("DUKKAN_API_TIMEOUT_SECS").ok(),
            file,
        )
    }

    /// Applies the resolution order to already-gathered sources.
    fn from_sources(
        env_url: Option<String>,
        env_timeout: Option<String>,
        file: FileConfig,
    ) -> ClientResult<Self> {
        let defaults = ApiConfig::default();

        let base_url = match env_url.or(file.base_url) {
            Some(raw) => Url::parse(&raw)
                .map_err(|e| ClientError::InvalidConfig(format!("base_url '{raw}': {e}")))?,
            None => defaults.base_url,
        };

        let timeout_secs = match env_timeout {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                ClientError::InvalidConfig(format!("DUKKAN_API_TIMEOUT_SECS '{raw}' is not a number"))
            })?,
            None => file.timeout_secs.unwrap_or(defaults.timeout_secs),
        };

        if timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(ApiConfig {
            base_url,
            timeout_secs,
        })
    }

    /// The per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Joins an endpoint path onto the base URL.
    ///
    /// `path` is relative ("products", "sales/7"); the base URL's own
    /// path segment is preserved.
    pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ClientError::InvalidConfig(format!("base_url '{}' cannot be a base", self.base_url))
            })?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    /// Standard location of the client config file, if one can be derived
    /// for this platform.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dukkan", "dukkan").map(|dirs| dirs.config_dir().join("client.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:8000/api");
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            base_url: Some("http://file.example/api".to_string()),
            timeout_secs: Some(10),
        };
        let cfg = ApiConfig::from_sources(
            Some("http://env.example/api".to_string()),
            Some("5".to_string()),
            file,
        )
        .unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://env.example/api");
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = FileConfig {
            base_url: Some("https://pos.example.com/api".to_string()),
            timeout_secs: None,
        };
        let cfg = ApiConfig::from_sources(None, None, file).unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://pos.example.com/api");
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ApiConfig::from_sources(
            Some("not a url".to_string()),
            None,
            FileConfig::default()
        )
        .is_err());

        assert!(ApiConfig::from_sources(
            None,
            Some("soon".to_string()),
            FileConfig::default()
        )
        .is_err());

        assert!(ApiConfig::from_sources(
            None,
            Some("0".to_string()),
            FileConfig::default()
        )
        .is_err());
    }

    #[test]
    fn test_endpoint_join_preserves_base_path() {
        let cfg = ApiConfig::default();
        assert_eq!(
            cfg.endpoint("products").unwrap().as_str(),
            "http://127.0.0.1:8000/api/products"
        );
        assert_eq!(
            cfg.endpoint("sales/7").unwrap().as_str(),
            "http://127.0.0.1:8000/api/sales/7"
        );
    }
}

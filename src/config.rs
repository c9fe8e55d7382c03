//! Client configuration.
//!
//! Defaults point at the production portfolio API; every field can be
//! overridden through the builder or the `FOLIO_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://portofolio-api-roan.vercel.app";

/// Path of the token refresh endpoint.
pub const DEFAULT_REFRESH_PATH: &str = "/api/auth/refresh-token";

/// Per-request transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the base URL.
pub const ENV_API_URL: &str = "FOLIO_API_URL";

/// Environment variable overriding the storage file location.
pub const ENV_STORAGE_PATH: &str = "FOLIO_STORAGE_PATH";

/// Environment variable overriding the request timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "FOLIO_TIMEOUT_SECS";

/// Configuration for [`crate::client::ApiClient`].
///
/// # Example
///
/// ```ignore
/// use folio::config::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://localhost:3000")
///     .with_request_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL every API path is joined onto
    pub base_url: String,
    /// Path of the refresh endpoint
    pub refresh_path: String,
    /// Timeout applied to each HTTP call
    pub request_timeout: Duration,
    /// Storage file location; `None` uses `~/.folio/storage.json`
    pub storage_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            storage_path: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the refresh endpoint path.
    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the storage file location.
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Join `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Full URL of the refresh endpoint.
    pub fn refresh_url(&self) -> String {
        self.url(&self.refresh_path)
    }

    /// Build config from the defaults plus `FOLIO_*` environment overrides.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from the defaults plus overrides returned by `lookup`.
    /// Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ClientError::Config {
                    message: format!("{} must be an http(s) URL, got {:?}", ENV_API_URL, url),
                });
            }
            config = config.with_base_url(url);
        }

        if let Some(path) = get(ENV_STORAGE_PATH) {
            config = config.with_storage_path(path);
        }

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| ClientError::Config {
                message: format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, secs),
            })?;
            if secs == 0 {
                return Err(ClientError::Config {
                    message: format!("{} must be greater than zero", ENV_TIMEOUT_SECS),
                });
            }
            config = config.with_request_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

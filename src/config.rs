//! Startup configuration
//!
//! Gathers the access token, account and file locations into one value that
//! is handed to the Graph client and cache store at construction. Nothing
//! reads the environment after this point.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::cache::CacheStore;
use crate::cli::StartupConfig;
use crate::data::graph::{DEFAULT_API_BASE_URL, DEFAULT_API_VERSION};
use crate::data::GraphClient;

/// Environment variable holding the Graph API access token
pub const ACCESS_TOKEN_ENV: &str = "META_ACCESS_TOKEN";

/// File name of the log, written beside the cache file
const LOG_FILE_NAME: &str = "adboard.log";

/// Errors that can occur while assembling configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The access token environment variable is unset or blank
    #[error("{0} is not set. Export a Meta access token with ads_read permission")]
    MissingAccessToken(&'static str),

    /// No cache location was given and none could be derived
    #[error("Could not determine a cache directory; pass --cache-file")]
    NoCacheDir,
}

/// Everything the application needs to know at startup
#[derive(Clone)]
pub struct Config {
    /// Graph API access token
    pub access_token: String,
    /// Ad account to read, always `act_`-prefixed
    pub account_id: String,
    /// Graph API host
    pub api_base_url: String,
    /// Graph API version
    pub api_version: String,
    /// Location of the campaign cache file
    pub cache_file: PathBuf,
    /// Whether the first load should bypass the cache
    pub refresh_on_start: bool,
}

impl Config {
    /// Builds configuration from CLI arguments and the process environment
    pub fn from_env(startup: StartupConfig) -> Result<Self, ConfigError> {
        let access_token = std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingAccessToken(ACCESS_TOKEN_ENV))?;

        Self::new(startup, access_token)
    }

    /// Builds configuration from CLI arguments and an explicit token
    pub fn new(startup: StartupConfig, access_token: String) -> Result<Self, ConfigError> {
        let cache_file = match startup.cache_file {
            Some(path) => path,
            None => CacheStore::new()
                .ok_or(ConfigError::NoCacheDir)?
                .path()
                .to_path_buf(),
        };

        Ok(Self {
            access_token,
            account_id: startup.account_id,
            api_base_url: startup
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            api_version: DEFAULT_API_VERSION.to_string(),
            cache_file,
            refresh_on_start: startup.force_refresh,
        })
    }

    /// A Graph client using this configuration's host, version and token
    pub fn graph_client(&self) -> GraphClient {
        GraphClient::with_base_url(&self.api_base_url, &self.access_token)
            .with_api_version(&self.api_version)
    }

    /// The cache store at the configured location
    pub fn cache_store(&self) -> CacheStore {
        CacheStore::with_path(self.cache_file.clone())
    }

    /// Location of the log file, next to the cache file
    pub fn log_file(&self) -> PathBuf {
        self.cache_file.with_file_name(LOG_FILE_NAME)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_token", &"<redacted>")
            .field("account_id", &self.account_id)
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("cache_file", &self.cache_file)
            .field("refresh_on_start", &self.refresh_on_start)
            .finish()
    }
}

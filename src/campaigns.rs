//! Cache-or-fetch access to campaign data
//!
//! `CampaignService` is what the rest of the application talks to. It reads
//! the cache file when one exists and only goes to the Graph API when asked to
//! refresh or when nothing has been cached yet.

use crate::cache::{unix_timestamp, CacheError, CacheStore};
use crate::config::Config;
use crate::data::{CampaignFetcher, CampaignRecord};

/// Where a set of campaigns came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Read back from the cache file
    Cache,
    /// Fetched from the Graph API just now
    Api,
}

/// Result of asking for campaigns
#[derive(Debug, Clone)]
pub struct CampaignsOutcome {
    /// The campaigns, empty if the fetch failed
    pub campaigns: Vec<CampaignRecord>,
    /// Human-readable reason the fetch failed, if it did
    pub error: Option<String>,
    /// Where `campaigns` came from
    pub origin: Origin,
    /// Fetch time in seconds since the Unix epoch, absent on failure
    pub fetched_at: Option<f64>,
}

impl CampaignsOutcome {
    fn failed(message: String) -> Self {
        Self {
            campaigns: Vec::new(),
            error: Some(message),
            origin: Origin::Api,
            fetched_at: None,
        }
    }
}

/// Serves campaigns from the cache file or the Graph API
#[derive(Debug, Clone)]
pub struct CampaignService {
    fetcher: CampaignFetcher,
    cache: CacheStore,
}

impl CampaignService {
    /// Creates a service from a fetcher and the cache it writes through
    pub fn new(fetcher: CampaignFetcher, cache: CacheStore) -> Self {
        Self { fetcher, cache }
    }

    /// Creates a service wired up from startup configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CampaignFetcher::new(config.graph_client()),
            config.cache_store(),
        )
    }

    /// The cache this service reads and writes
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Returns campaigns for an account, from cache unless told otherwise
    ///
    /// # Arguments
    /// * `account_id` - The ad account to read
    /// * `force_refresh` - Skip the cache and fetch from the API
    ///
    /// # Behavior
    /// - With `force_refresh`, or when no cache file exists, fetches from the
    ///   API (see [`CampaignService::refresh`])
    /// - Otherwise returns the cached campaigns as-is, however old they are
    pub async fn get_campaigns(
        &self,
        account_id: &str,
        force_refresh: bool,
    ) -> Result<CampaignsOutcome, CacheError> {
        if !force_refresh {
            if let Some(envelope) = self.cache.read()? {
                log::info!("Serving {} campaigns from cache", envelope.campaigns.len());
                return Ok(CampaignsOutcome {
                    campaigns: envelope.campaigns,
                    error: None,
                    origin: Origin::Cache,
                    fetched_at: Some(envelope.timestamp),
                });
            }
        }

        self.refresh(account_id).await
    }

    /// Fetches campaigns from the API and replaces the cache with them
    ///
    /// API failures are not errors here: they are logged and reported through
    /// `CampaignsOutcome::error` with an empty campaign list, and the cache
    /// file is left as it was. Only failures to write the cache are returned
    /// as `Err`.
    pub async fn refresh(&self, account_id: &str) -> Result<CampaignsOutcome, CacheError> {
        log::info!("Fetching campaigns for {}", account_id);

        match self.fetcher.fetch_campaigns(account_id).await {
            Ok(campaigns) => {
                let timestamp = unix_timestamp();
                self.cache.write(&campaigns, timestamp)?;
                log::info!("Fetched and cached {} campaigns", campaigns.len());
                Ok(CampaignsOutcome {
                    campaigns,
                    error: None,
                    origin: Origin::Api,
                    fetched_at: Some(timestamp),
                })
            }
            Err(e) => {
                let message = format!("Error fetching Meta campaigns: {}", e);
                log::error!("{}", message);
                Ok(CampaignsOutcome::failed(message))
            }
        }
    }
}

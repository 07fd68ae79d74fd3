//! Cache store for persisting fetched campaigns to disk
//!
//! Provides a `CacheStore` that writes the full campaign list plus a fetch
//! timestamp to a single JSON file, replacing it wholesale on every write.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::CampaignRecord;

/// How long fetched data is considered fresh, in seconds
///
/// Only used to label data as stale for display. Reads never expire.
pub const CACHE_DURATION_SECS: u64 = 3600;

/// File name of the cache inside the cache directory
pub const CACHE_FILE_NAME: &str = "campaign_cache.json";

/// Errors that can occur while reading or writing the cache file
#[derive(Debug, Error)]
pub enum CacheError {
    /// The file could not be read, written, or its directory created
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file exists but does not hold a valid envelope
    #[error("Cache file {path} is corrupt: {source}")]
    Corrupt {
        /// Location of the offending file
        path: PathBuf,
        /// Underlying parse failure
        #[source]
        source: serde_json::Error,
    },
}

/// Everything stored in the cache file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEnvelope {
    /// When the campaigns were fetched, in seconds since the Unix epoch
    pub timestamp: f64,
    /// The fetched campaigns, exactly as they were built
    pub campaigns: Vec<CampaignRecord>,
}

/// Borrowed form of [`CacheEnvelope`] used when writing
#[derive(Serialize)]
struct CacheEntry<'a> {
    timestamp: f64,
    campaigns: &'a [CampaignRecord],
}

/// Converts a cache timestamp into a UTC datetime
pub fn fetched_time(timestamp: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis((timestamp * 1000.0) as i64)
}

/// Whether data fetched at `timestamp` is past the cache duration at `now`
///
/// Only used for display: stale data is still served.
pub fn is_stale(timestamp: f64, now: f64) -> bool {
    now - timestamp > CACHE_DURATION_SECS as f64
}

/// Current time in fractional seconds since the Unix epoch
pub fn unix_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Reads and writes the single campaign cache file
///
/// The default location is `~/.cache/adboard/campaign_cache.json` on Linux, or
/// the equivalent XDG path on other platforms. Writes are plain overwrites: no
/// temp-file swap, no fsync, no locking.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Location of the cache file
    path: PathBuf,
}

impl CacheStore {
    /// Creates a CacheStore in the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "adboard")?;
        let path = project_dirs.cache_dir().join(CACHE_FILE_NAME);
        Some(Self { path })
    }

    /// Creates a CacheStore backed by a specific file
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the directory holding the cache file exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
            _ => Ok(()),
        }
    }

    /// Reads the cached envelope
    ///
    /// # Returns
    /// * `Ok(Some(CacheEnvelope))` if the file exists and parses
    /// * `Ok(None)` if there is no cache file yet
    /// * `Err(CacheError)` if the file cannot be read or is corrupt
    pub fn read(&self) -> Result<Option<CacheEnvelope>, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let envelope = serde_json::from_str(&content).map_err(|source| CacheError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("Read cache from {}", self.path.display());

        Ok(Some(envelope))
    }

    /// Replaces the cache file with a new envelope
    ///
    /// # Arguments
    /// * `campaigns` - The full campaign list to persist
    /// * `timestamp` - Fetch time in seconds since the Unix epoch
    pub fn write(&self, campaigns: &[CampaignRecord], timestamp: f64) -> Result<(), CacheError> {
        self.ensure_dir()?;

        let entry = CacheEntry {
            timestamp,
            campaigns,
        };
        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;

        fs::write(&self.path, json)?;
        log::debug!(
            "Wrote {} campaigns to {}",
            campaigns.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AudienceRecord;
    use tempfile::TempDir;

    fn create_test_store() -> (CacheStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = CacheStore::with_path(temp_dir.path().join(CACHE_FILE_NAME));
        (store, temp_dir)
    }

    fn campaign(name: &str) -> CampaignRecord {
        CampaignRecord {
            name: name.to_string(),
            objective: "Reach".to_string(),
            status: "ACTIVE".to_string(),
            daily_budget: "$50.00".to_string(),
            lifetime_budget: "N/A".to_string(),
            spend_cap: "N/A".to_string(),
            start_time: "2024-07-01T00:00:00+0800".to_string(),
            stop_time: "N/A".to_string(),
            audience: vec![AudienceRecord {
                name: "All Users".to_string(),
                age_min: Some(18),
                age_max: None,
                locations: vec!["MY".to_string()],
                interests: vec!["N/A".to_string()],
                ads: vec![],
            }],
            captions: vec!["Buy now".to_string()],
            headlines: vec!["Big Sale".to_string()],
        }
    }

    #[test]
    fn test_read_returns_none_for_missing_file() {
        let (store, _temp_dir) = create_test_store();

        assert!(!store.path().exists());
        assert!(store.read().expect("Read should succeed").is_none());
    }

    #[test]
    fn test_write_then_read_returns_same_envelope() {
        let (store, _temp_dir) = create_test_store();
        let campaigns = vec![campaign("Promo"), campaign("Retargeting")];

        store.write(&campaigns, 1_720_000_000.5).expect("Write should succeed");

        let envelope = store.read().expect("Read should succeed").expect("Envelope present");
        assert_eq!(envelope.timestamp, 1_720_000_000.5);
        assert_eq!(envelope.campaigns, campaigns);
    }

    #[test]
    fn test_file_layout_has_timestamp_and_campaigns() {
        let (store, _temp_dir) = create_test_store();

        store.write(&[campaign("Promo")], 42.0).expect("Write should succeed");

        let content = fs::read_to_string(store.path()).expect("Should read file");
        let json: serde_json::Value = serde_json::from_str(&content).expect("Valid JSON");
        assert_eq!(json["timestamp"], serde_json::json!(42.0));
        assert_eq!(json["campaigns"][0]["name"], "Promo");
        assert_eq!(json["campaigns"][0]["audience"][0]["age_max"], "N/A");
    }

    #[test]
    fn test_overwrite_replaces_everything() {
        let (store, _temp_dir) = create_test_store();

        store
            .write(&[campaign("First"), campaign("Second")], 1.0)
            .expect("First write should succeed");
        store.write(&[campaign("Third")], 2.0).expect("Second write should succeed");

        let envelope = store.read().unwrap().unwrap();
        assert_eq!(envelope.timestamp, 2.0);
        assert_eq!(envelope.campaigns.len(), 1);
        assert_eq!(envelope.campaigns[0].name, "Third");
    }

    #[test]
    fn test_write_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested").join("cache");
        let store = CacheStore::with_path(nested.join(CACHE_FILE_NAME));

        store.write(&[], 1.0).expect("Write should succeed");

        assert!(nested.join(CACHE_FILE_NAME).exists(), "Cache file should exist");
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let (store, _temp_dir) = create_test_store();
        fs::write(store.path(), "{ not an envelope").unwrap();

        let err = store.read().unwrap_err();

        assert!(matches!(err, CacheError::Corrupt { .. }));
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn test_read_trusts_old_data() {
        let (store, _temp_dir) = create_test_store();

        // Written "a day ago" by timestamp; reads still return it
        let day_old = unix_timestamp() - 86_400.0;
        store.write(&[campaign("Old")], day_old).unwrap();

        let envelope = store.read().unwrap().unwrap();
        assert_eq!(envelope.campaigns[0].name, "Old");
        assert!(is_stale(envelope.timestamp, unix_timestamp()));
    }

    #[test]
    fn test_fetched_time_converts_timestamp() {
        let fetched_at = fetched_time(1_700_000_000.25).expect("Valid timestamp");
        assert_eq!(fetched_at.timestamp(), 1_700_000_000);
        assert_eq!(fetched_at.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_is_stale_after_cache_duration() {
        let fetched = 1_700_000_000.0;
        assert!(!is_stale(fetched, fetched + 100.0));
        assert!(!is_stale(fetched, fetched + CACHE_DURATION_SECS as f64));
        assert!(is_stale(fetched, fetched + CACHE_DURATION_SECS as f64 + 1.0));
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(store) = CacheStore::new() {
            let path_str = store.path().to_string_lossy();
            assert!(path_str.contains("adboard"), "Cache path should contain project name");
            assert!(path_str.ends_with(CACHE_FILE_NAME));
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }
}

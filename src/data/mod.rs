//! Core data models for adboard
//!
//! This module contains the normalized, display-ready records built from the
//! Meta Graph API, plus the client and fetcher that produce them.

pub mod fetcher;
pub mod format;
pub mod graph;

pub use fetcher::CampaignFetcher;
pub use graph::{GraphClient, GraphError};

use serde::{Deserialize, Serialize};

/// Placeholder shown wherever the API did not supply a value
pub const NOT_AVAILABLE: &str = "N/A";

/// An active campaign, reshaped for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    /// Campaign name
    pub name: String,
    /// Objective in title case (e.g. "Link Clicks")
    pub objective: String,
    /// Configured status (e.g. "ACTIVE")
    pub status: String,
    /// Daily budget with currency prefix, or "N/A"
    pub daily_budget: String,
    /// Lifetime budget with currency prefix, or "N/A"
    pub lifetime_budget: String,
    /// Spend cap with currency prefix, or "N/A"
    pub spend_cap: String,
    /// Schedule start, passed through from the API
    pub start_time: String,
    /// Schedule end, passed through from the API
    pub stop_time: String,
    /// Active ad-sets under this campaign
    pub audience: Vec<AudienceRecord>,
    /// Caption sentences across every ad in the campaign
    pub captions: Vec<String>,
    /// Headlines across every ad in the campaign
    pub headlines: Vec<String>,
}

/// An ad-set and its targeting, flattened for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceRecord {
    /// Ad-set name
    pub name: String,
    /// Minimum targeted age, serialized as "N/A" when absent
    #[serde(with = "age_bound")]
    pub age_min: Option<u32>,
    /// Maximum targeted age, serialized as "N/A" when absent
    #[serde(with = "age_bound")]
    pub age_max: Option<u32>,
    /// Countries, then region names, then city names
    pub locations: Vec<String>,
    /// Interest names from the targeting spec
    #[serde(default = "not_available_list")]
    pub interests: Vec<String>,
    /// Ads running in this ad-set
    #[serde(default)]
    pub ads: Vec<AdRecord>,
}

/// A single ad with its creative text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdRecord {
    /// Ad name
    pub name: String,
    /// Creative body split into sentences
    pub captions: Vec<String>,
    /// Creative title
    pub headline: String,
}

impl CampaignRecord {
    /// Total number of ads across all ad-sets
    pub fn ad_count(&self) -> usize {
        self.audience.iter().map(|a| a.ads.len()).sum()
    }
}

/// Renders an optional age bound the same way it is stored
pub fn display_age(age: Option<u32>) -> String {
    age.map(|a| a.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn not_available_list() -> Vec<String> {
    vec![NOT_AVAILABLE.to_string()]
}

/// Serializes `Option<u32>` as either a number or the "N/A" placeholder.
mod age_bound {
    use super::NOT_AVAILABLE;
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Years(u32),
        Placeholder(IgnoredAny),
    }

    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(years) => serializer.serialize_u32(*years),
            None => serializer.serialize_str(NOT_AVAILABLE),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        Ok(match Stored::deserialize(deserializer)? {
            Stored::Years(years) => Some(years),
            Stored::Placeholder(_) => None,
        })
    }
}

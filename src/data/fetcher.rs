//! Builds normalized campaign records from the Graph API
//!
//! Walks campaign → ad-set → ad → creative one request at a time and
//! reshapes each raw object for display.

use super::format::{format_budget, format_caption, format_objective};
use super::graph::{GraphClient, GraphError, RawAdSet, RawCampaign, RawTargeting};
use super::{AdRecord, AudienceRecord, CampaignRecord, NOT_AVAILABLE};

/// Fetches active campaigns and everything displayed beneath them
#[derive(Debug, Clone)]
pub struct CampaignFetcher {
    client: GraphClient,
}

impl CampaignFetcher {
    /// Creates a fetcher over the given Graph client
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    /// Fetches every ACTIVE campaign of an ad account
    ///
    /// # Arguments
    /// * `account_id` - The ad account, e.g. `act_1837837733021085`
    ///
    /// # Returns
    /// * `Ok(Vec<CampaignRecord>)` - One record per active campaign
    /// * `Err(GraphError)` - The first failing request aborts the whole fetch
    pub async fn fetch_campaigns(&self, account_id: &str) -> Result<Vec<CampaignRecord>, GraphError> {
        let raw_campaigns = self.client.active_campaigns(account_id).await?;
        log::info!(
            "Account {} has {} active campaigns",
            account_id,
            raw_campaigns.len()
        );

        let mut campaigns = Vec::with_capacity(raw_campaigns.len());
        for raw in raw_campaigns {
            campaigns.push(self.build_campaign(raw).await?);
        }

        Ok(campaigns)
    }

    /// Builds one campaign record, fetching its ad-sets and ads
    async fn build_campaign(&self, raw: RawCampaign) -> Result<CampaignRecord, GraphError> {
        let ad_sets = self.client.active_ad_sets(&raw.id).await?;
        log::debug!("Campaign {} has {} active ad-sets", raw.id, ad_sets.len());

        let mut audience = Vec::with_capacity(ad_sets.len());
        for ad_set in ad_sets {
            let ads = self.build_ads(&ad_set.id).await?;
            audience.push(build_audience(ad_set, ads));
        }

        let captions = audience
            .iter()
            .flat_map(|a| &a.ads)
            .flat_map(|ad| ad.captions.iter().cloned())
            .collect();
        let headlines = audience
            .iter()
            .flat_map(|a| &a.ads)
            .map(|ad| ad.headline.clone())
            .collect();

        Ok(CampaignRecord {
            name: or_not_available(raw.name),
            objective: format_objective(raw.objective.as_deref()),
            status: or_not_available(raw.status),
            daily_budget: format_budget(raw.daily_budget.as_deref()),
            lifetime_budget: format_budget(raw.lifetime_budget.as_deref()),
            spend_cap: format_budget(raw.spend_cap.as_deref()),
            start_time: or_not_available(raw.start_time),
            stop_time: or_not_available(raw.stop_time),
            audience,
            captions,
            headlines,
        })
    }

    /// Fetches the ads of an ad-set along with their creatives
    ///
    /// Ads without a linked creative are skipped.
    async fn build_ads(&self, ad_set_id: &str) -> Result<Vec<AdRecord>, GraphError> {
        let raw_ads = self.client.ads(ad_set_id).await?;

        let mut ads = Vec::with_capacity(raw_ads.len());
        for ad in raw_ads {
            let Some(creative_ref) = ad.creative else {
                log::debug!("Ad {} has no creative, skipping", ad.id);
                continue;
            };
            let creative = self.client.creative(&creative_ref.id).await?;
            ads.push(AdRecord {
                name: or_not_available(ad.name),
                captions: format_caption(creative.body.as_deref()),
                headline: or_not_available(creative.title),
            });
        }

        Ok(ads)
    }
}

/// Reshapes an ad-set's targeting into an audience record
fn build_audience(ad_set: RawAdSet, ads: Vec<AdRecord>) -> AudienceRecord {
    let targeting = ad_set.targeting.unwrap_or_default();

    AudienceRecord {
        name: or_not_available(ad_set.name),
        age_min: targeting.age_min,
        age_max: targeting.age_max,
        locations: flatten_locations(&targeting),
        interests: interest_names(&targeting),
        ads,
    }
}

/// Flattens geo targeting into one list: countries, then regions, then cities
///
/// Returns `["N/A"]` when the ad-set targets no location.
pub fn flatten_locations(targeting: &RawTargeting) -> Vec<String> {
    let mut locations = Vec::new();

    if let Some(geo) = &targeting.geo_locations {
        locations.extend(geo.countries.iter().cloned());
        locations.extend(geo.regions.iter().filter_map(|r| r.name.clone()));
        locations.extend(geo.cities.iter().filter_map(|c| c.name.clone()));
    }

    if locations.is_empty() {
        locations.push(NOT_AVAILABLE.to_string());
    }
    locations
}

/// Collects interest names, or `["N/A"]` when none are targeted
fn interest_names(targeting: &RawTargeting) -> Vec<String> {
    let names: Vec<String> = targeting
        .interests
        .iter()
        .filter_map(|i| i.name.clone())
        .collect();

    if names.is_empty() {
        vec![NOT_AVAILABLE.to_string()]
    } else {
        names
    }
}

fn or_not_available(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

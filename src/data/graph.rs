//! Meta Graph API client
//!
//! Typed read access to the ad account hierarchy: account → campaigns →
//! ad-sets → ads → creatives. Every response is parsed into the `Raw*`
//! structs below at the boundary; shape mismatches surface as
//! [`GraphError::ParseError`] instead of being papered over downstream.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Base URL for the Graph API
pub const DEFAULT_API_BASE_URL: &str = "https://graph.facebook.com";

/// Graph API version all requests are pinned to
pub const DEFAULT_API_VERSION: &str = "v21.0";

/// Campaign fields requested from the account's campaigns edge
const CAMPAIGN_FIELDS: &str =
    "name,objective,status,daily_budget,lifetime_budget,spend_cap,start_time,stop_time";

/// Ad-set fields requested from a campaign's adsets edge
const AD_SET_FIELDS: &str = "name,targeting";

/// Ad fields requested from an ad-set's ads edge
const AD_FIELDS: &str = "name,creative";

/// Creative fields requested for each linked creative
const CREATIVE_FIELDS: &str = "body,title";

/// Restricts an edge to objects whose effective status is ACTIVE
const ACTIVE_FILTER: &str = r#"[{"field":"effective_status","operator":"IN","value":["ACTIVE"]}]"#;

/// Page size requested on every edge
const PAGE_LIMIT: &str = "100";

/// Errors that can occur when talking to the Graph API
#[derive(Debug, Error)]
pub enum GraphError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The API answered with a non-success status
    #[error("Graph API returned status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the error body, or the raw body if it had none
        message: String,
    },
}

impl GraphError {
    /// Builds an `Api` error from a non-success response body
    fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|r| match r.error.kind {
                Some(kind) => format!("{} ({})", r.error.message, kind),
                None => r.error.message,
            })
            .unwrap_or_else(|_| body.trim().to_string());

        GraphError::Api { status, message }
    }
}

/// A campaign as returned by the campaigns edge
#[derive(Debug, Clone, Deserialize)]
pub struct RawCampaign {
    pub id: String,
    pub name: Option<String>,
    pub objective: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub daily_budget: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub lifetime_budget: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub spend_cap: Option<String>,
    pub start_time: Option<String>,
    pub stop_time: Option<String>,
}

/// An ad-set as returned by the adsets edge
#[derive(Debug, Clone, Deserialize)]
pub struct RawAdSet {
    pub id: String,
    pub name: Option<String>,
    pub targeting: Option<RawTargeting>,
}

/// The subset of an ad-set's targeting spec that is displayed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTargeting {
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub geo_locations: Option<RawGeoLocations>,
    #[serde(default)]
    pub interests: Vec<NamedEntry>,
}

/// Geographic targeting: country codes directly, regions and cities by name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGeoLocations {
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub regions: Vec<NamedEntry>,
    #[serde(default)]
    pub cities: Vec<NamedEntry>,
}

/// Any targeting entry carrying a display name (region, city, interest)
#[derive(Debug, Clone, Deserialize)]
pub struct NamedEntry {
    pub name: Option<String>,
}

/// An ad as returned by the ads edge
#[derive(Debug, Clone, Deserialize)]
pub struct RawAd {
    pub id: String,
    pub name: Option<String>,
    pub creative: Option<ObjectRef>,
}

/// A reference to another Graph object by id
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    pub id: String,
}

/// The text payload of an ad creative
#[derive(Debug, Clone, Deserialize)]
pub struct RawCreative {
    pub body: Option<String>,
    pub title: Option<String>,
}

/// One page of an edge listing
#[derive(Debug, Deserialize)]
struct Page<T> {
    data: Vec<T>,
    paging: Option<Paging>,
}

/// Cursor links for an edge listing
#[derive(Debug, Deserialize)]
struct Paging {
    next: Option<String>,
}

/// Error body returned by the Graph API
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Client for reading the ad account hierarchy
#[derive(Debug, Clone)]
pub struct GraphClient {
    http_client: Client,
    base_url: String,
    api_version: String,
    access_token: String,
}

impl GraphClient {
    /// Creates a client against a Graph API host
    ///
    /// Production passes [`DEFAULT_API_BASE_URL`]; tests pass a local server.
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: access_token.into(),
        }
    }

    /// Overrides the pinned API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Builds the URL for a node, or for one of its edges
    fn node_url(&self, node_id: &str, edge: Option<&str>) -> String {
        match edge {
            Some(edge) => format!("{}/{}/{}/{}", self.base_url, self.api_version, node_id, edge),
            None => format!("{}/{}/{}", self.base_url, self.api_version, node_id),
        }
    }

    /// Lists the ACTIVE campaigns of an ad account
    pub async fn active_campaigns(&self, account_id: &str) -> Result<Vec<RawCampaign>, GraphError> {
        let url = self.node_url(account_id, Some("campaigns"));
        self.get_edge(&url, &[("fields", CAMPAIGN_FIELDS), ("filtering", ACTIVE_FILTER)])
            .await
    }

    /// Lists the ACTIVE ad-sets of a campaign
    pub async fn active_ad_sets(&self, campaign_id: &str) -> Result<Vec<RawAdSet>, GraphError> {
        let url = self.node_url(campaign_id, Some("adsets"));
        self.get_edge(&url, &[("fields", AD_SET_FIELDS), ("filtering", ACTIVE_FILTER)])
            .await
    }

    /// Lists every ad of an ad-set, regardless of status
    pub async fn ads(&self, ad_set_id: &str) -> Result<Vec<RawAd>, GraphError> {
        let url = self.node_url(ad_set_id, Some("ads"));
        self.get_edge(&url, &[("fields", AD_FIELDS)]).await
    }

    /// Reads the body and title of a creative
    pub async fn creative(&self, creative_id: &str) -> Result<RawCreative, GraphError> {
        let url = self.node_url(creative_id, None);
        self.get_json(self.http_client.get(&url).query(&[("fields", CREATIVE_FIELDS)]))
            .await
    }

    /// Reads every page of an edge, following `paging.next`
    async fn get_edge<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, GraphError> {
        log::debug!("GET {}", url);

        let mut page: Page<T> = self
            .get_json(
                self.http_client
                    .get(url)
                    .query(params)
                    .query(&[("limit", PAGE_LIMIT)]),
            )
            .await?;
        let mut items = Vec::new();

        loop {
            items.extend(page.data);
            match page.paging.and_then(|p| p.next) {
                Some(next) => {
                    log::debug!("Following next page: {}", next);
                    page = self.get_json(self.http_client.get(&next)).await?;
                }
                None => break,
            }
        }

        Ok(items)
    }

    /// Sends an authenticated request and parses the JSON body
    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GraphError> {
        let response = request.bearer_auth(&self.access_token).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GraphError::from_response(status.as_u16(), &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Accepts a JSON string or number, keeping it as text
///
/// Budgets come back as strings from the Graph API, but numbers are
/// tolerated so either form reaches the formatter unchanged.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Whole(i64),
        Fraction(f64),
    }

    Ok(Option::<Amount>::deserialize(deserializer)?.map(|amount| match amount {
        Amount::Text(s) => s,
        Amount::Whole(n) => n.to_string(),
        Amount::Fraction(n) => n.to_string(),
    }))
}

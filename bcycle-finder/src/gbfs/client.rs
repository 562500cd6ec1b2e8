//! GBFS HTTP client.
//!
//! Fetches one named feed per call and returns the parsed JSON document
//! untouched. Callers know which shape to expect and decode it themselves.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::error::FeedError;
use super::program::Program;

/// Default base URL for BCycle GBFS feeds.
const DEFAULT_BASE_URL: &str = "https://gbfs.bcycle.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The feeds this client knows how to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    StationInformation,
    StationStatus,
    SystemInformation,
    SystemPricingPlans,
}

impl Feed {
    /// All feeds, in the order they are usually requested.
    pub const ALL: [Feed; 4] = [
        Feed::StationInformation,
        Feed::StationStatus,
        Feed::SystemInformation,
        Feed::SystemPricingPlans,
    ];

    /// The feed name as used in the URL, e.g. `station_status`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Feed::StationInformation => "station_information",
            Feed::StationStatus => "station_status",
            Feed::SystemInformation => "system_information",
            Feed::SystemPricingPlans => "system_pricing_plans",
        }
    }

    /// Look up a feed by its URL name.
    pub fn from_name(name: &str) -> Option<Feed> {
        Feed::ALL.into_iter().find(|feed| feed.as_str() == name)
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability to fetch a feed document.
///
/// Implemented by [`GbfsClient`] and by [`super::MockFeedSource`].
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch one feed for a program and return the parsed document.
    async fn fetch_feed(&self, feed: Feed, program: &Program) -> Result<Value, FeedError>;
}

/// Configuration for the GBFS client.
#[derive(Debug, Clone)]
pub struct GbfsConfig {
    /// Base URL of the feed host (no trailing slash)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GbfsConfig {
    /// Create a config pointing at the public BCycle feed host.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing or mirrors).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GbfsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// GBFS feed client backed by `reqwest`.
///
/// Issues exactly one GET per fetch. There is no retry policy.
#[derive(Debug, Clone)]
pub struct GbfsClient {
    http: reqwest::Client,
    base_url: String,
}

impl GbfsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GbfsConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// The URL a feed is fetched from: `{base}/bcycle_{program}/{feed}.json`.
    pub fn feed_url(&self, feed: Feed, program: &Program) -> String {
        format!(
            "{}/{}/{}.json",
            self.base_url,
            program.path_segment(),
            feed.as_str()
        )
    }
}

#[async_trait]
impl FeedSource for GbfsClient {
    async fn fetch_feed(&self, feed: Feed, program: &Program) -> Result<Value, FeedError> {
        let url = self.feed_url(feed, program);
        debug!(%feed, %url, "fetching feed");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FeedError::Parse {
            feed,
            message: e.to_string(),
        })
    }
}

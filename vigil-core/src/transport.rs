//! Network and desktop capabilities consumed by the vendor adapters.
//!
//! One fetch is one round trip: no retries, no redirect-chasing beyond
//! reqwest's defaults. A non-success response or an unreadable body becomes
//! a [`VigilError::Fetch`] carrying the attempted URL; payload shape
//! checking is the adapters' concern.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Result, VigilError};

const USER_AGENT: &str = concat!("vigil/", env!("CARGO_PKG_VERSION"));

/// A single entry of a status feed.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    timeout: Option<Duration>,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            timeout: None,
        }
    }

    /// Cap each request at `timeout`. Without this the client's own default
    /// applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let mut request = self.http.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| VigilError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(VigilError::Fetch {
                url: url.to_string(),
                reason: format!("got status code: {}", status.as_u16()),
            });
        }

        Ok(response)
    }

    /// Fetch `url` and decode the body as JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        debug!(url = %url, "fetching JSON");

        let response = self.get(url).await?;
        response.json().await.map_err(|e| VigilError::Fetch {
            url: url.to_string(),
            reason: format!("malformed JSON body: {}", e),
        })
    }

    /// Fetch `url` and return the raw body text.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url = %url, "fetching text");

        let response = self.get(url).await?;
        response.text().await.map_err(|e| VigilError::Fetch {
            url: url.to_string(),
            reason: format!("unreadable body: {}", e),
        })
    }

    /// Fetch `url` and parse it as an RSS/Atom feed.
    pub async fn fetch_feed(&self, url: &str) -> Result<Vec<FeedItem>> {
        debug!(url = %url, "fetching feed");

        let body = self.fetch_text(url).await?;
        let feed = feed_rs::parser::parse(body.as_bytes()).map_err(|e| VigilError::Fetch {
            url: url.to_string(),
            reason: format!("malformed feed: {}", e),
        })?;

        Ok(feed
            .entries
            .into_iter()
            .map(|entry| FeedItem {
                title: entry.title.map(|t| t.content).unwrap_or_default(),
            })
            .collect())
    }

    /// Open `url` in the user's browser. Best-effort: a failure is logged
    /// and swallowed.
    pub fn open_in_browser(&self, url: &str) {
        debug!(url = %url, "opening browser");
        if let Err(e) = open::that(url) {
            warn!(url = %url, "could not open browser: {}", e);
        }
    }
}

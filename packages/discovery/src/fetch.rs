//! HTTP page fetcher with browser-like headers.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{DiscoveryError, Result};
use crate::traits::PageFetcher;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Page fetcher backed by reqwest. Uses a browser-like User-Agent to
/// avoid bot detection on restaurant sites, follows a limited number
/// of redirects, and bounds every request with a timeout.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .parse()
                .map_err(|_| DiscoveryError::Config("invalid Accept header".to_string()))?,
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            "en-US,en;q=0.5"
                .parse()
                .map_err(|_| DiscoveryError::Config("invalid Accept-Language header".to_string()))?,
        );

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| DiscoveryError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        tracing::debug!(url = %url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DiscoveryError::Provider(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::provider(format!("HTTP {status} for {url}")));
        }

        response
            .text()
            .await
            .map_err(|e| DiscoveryError::Provider(Box::new(e)))
    }
}

//! Webpage-fetch trait.

use async_trait::async_trait;

use crate::error::Result;

/// Plain HTTP GET for a page body, used when scraping restaurant
/// websites for a usable photo.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the HTML body at `url`, following redirects, with a
    /// bounded timeout.
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

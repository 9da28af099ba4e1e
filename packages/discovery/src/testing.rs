//! Scripted mock providers for tests.
//!
//! Mocks return queued responses in FIFO order and record what they
//! were asked, so tests can assert on both outputs and the prompts or
//! URLs that produced them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{DiscoveryError, Result};
use crate::traits::{GenerativeModel, PageFetcher, PlaceHit, PlaceSearch};

enum MockReply {
    Text(String),
    Fail(String),
}

/// Generation provider with a scripted FIFO queue of replies.
///
/// An exhausted queue is a test bug and panics with the prompt that
/// triggered it.
#[derive(Default)]
pub struct MockModel {
    replies: Mutex<Vec<MockReply>>,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful text reply.
    pub fn with_response(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Text(text.to_string()));
        self
    }

    /// Queue a provider failure.
    pub fn with_failure(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Fail(message.to_string()));
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = {
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                panic!("MockModel queue exhausted; unexpected prompt: {prompt}");
            }
            replies.remove(0)
        };
        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail(message) => Err(DiscoveryError::provider(message)),
        }
    }
}

/// Place-search provider returning a fixed hit list for every query.
#[derive(Default)]
pub struct MockPlaceSearch {
    hits: Vec<PlaceHit>,
    fail: bool,
    queries: Mutex<Vec<String>>,
}

impl MockPlaceSearch {
    /// No hits for any query.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hit(mut self, hit: PlaceHit) -> Self {
        self.hits.push(hit);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceSearch for MockPlaceSearch {
    async fn search(&self, query: &str) -> Result<Vec<PlaceHit>> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(DiscoveryError::provider("place search unavailable"));
        }
        Ok(self.hits.clone())
    }

    fn photo_url(&self, reference: &str, max_width: u32) -> String {
        format!("https://mockplaces.test/photo/{reference}?w={max_width}")
    }
}

/// Page fetcher serving canned HTML per URL; unknown URLs fail.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// Fails every fetch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| DiscoveryError::provider(format!("no canned page for {url}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_model_fifo_and_recording() {
        let model = MockModel::new()
            .with_response("first")
            .with_failure("boom");

        assert_eq!(model.generate("p1").await.unwrap(), "first");
        assert!(model.generate("p2").await.is_err());
        assert_eq!(model.prompts(), vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_mock_place_search_photo_url() {
        let places = MockPlaceSearch::new().with_hit(PlaceHit {
            name: "Delfina".to_string(),
            photo_references: vec!["ref1".to_string()],
            ..Default::default()
        });
        let hits = places.search("Delfina restaurant SF").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(
            places.photo_url("ref1", 400),
            "https://mockplaces.test/photo/ref1?w=400"
        );
    }

    #[tokio::test]
    async fn test_mock_fetcher_unknown_url_fails() {
        let fetcher = MockFetcher::new().with_page("https://a.test/", "<html></html>");
        assert!(fetcher.fetch_html("https://a.test/").await.is_ok());
        assert!(fetcher.fetch_html("https://b.test/").await.is_err());
    }
}

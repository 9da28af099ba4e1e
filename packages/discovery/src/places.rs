//! Google Places implementation of the place-search trait.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{DiscoveryError, Result};
use crate::traits::{PlaceHit, PlaceSearch};

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const PHOTO_URL: &str = "https://maps.googleapis.com/maps/api/place/photo";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Google Places text-search client.
pub struct GooglePlacesClient {
    api_key: String,
    client: reqwest::Client,
}

impl GooglePlacesClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DiscoveryError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            client,
        })
    }
}

#[async_trait]
impl PlaceSearch for GooglePlacesClient {
    async fn search(&self, query: &str) -> Result<Vec<PlaceHit>> {
        let response = self
            .client
            .get(TEXT_SEARCH_URL)
            .query(&[
                ("query", query),
                ("type", "restaurant"),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| DiscoveryError::Provider(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DiscoveryError::provider(format!(
                "Places API error {status}: {body}"
            )));
        }

        let parsed: TextSearchResponse = response
            .json()
            .await
            .map_err(|e| DiscoveryError::Provider(Box::new(e)))?;

        Ok(parsed
            .results
            .into_iter()
            .map(|r| PlaceHit {
                name: r.name,
                rating: r.rating,
                photo_references: r
                    .photos
                    .into_iter()
                    .map(|p| p.photo_reference)
                    .collect(),
                formatted_address: r.formatted_address,
                price_level: r.price_level,
                types: r.types,
                latitude: r.geometry.as_ref().map(|g| g.location.lat),
                longitude: r.geometry.as_ref().map(|g| g.location.lng),
            })
            .collect())
    }

    fn photo_url(&self, reference: &str, max_width: u32) -> String {
        format!(
            "{PHOTO_URL}?maxwidth={max_width}&photoreference={reference}&key={}",
            self.api_key
        )
    }
}

/// No-op place search for when no API key is configured. Every lookup
/// yields nothing, so the image chain simply moves on.
pub struct NoopPlaceSearch;

#[async_trait]
impl PlaceSearch for NoopPlaceSearch {
    async fn search(&self, _query: &str) -> Result<Vec<PlaceHit>> {
        tracing::warn!("NoopPlaceSearch: search called but no Places API key configured");
        Ok(Vec::new())
    }

    fn photo_url(&self, _reference: &str, _max_width: u32) -> String {
        String::new()
    }
}

// Wire types for the text-search endpoint.

#[derive(Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<TextSearchResult>,
}

#[derive(Deserialize)]
struct TextSearchResult {
    name: String,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    photos: Vec<Photo>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    price_level: Option<u8>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Photo {
    photo_reference: String,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_url_format() {
        let client = GooglePlacesClient::new("test-key").unwrap();
        let url = client.photo_url("ref123", 400);
        assert_eq!(
            url,
            "https://maps.googleapis.com/maps/api/place/photo?maxwidth=400&photoreference=ref123&key=test-key"
        );
    }

    #[test]
    fn test_text_search_response_deserializes() {
        let json = r#"{
            "results": [{
                "name": "Delfina",
                "rating": 4.4,
                "photos": [{"photo_reference": "abc"}],
                "formatted_address": "3621 18th St, San Francisco",
                "price_level": 2,
                "types": ["restaurant"],
                "geometry": {"location": {"lat": 37.76, "lng": -122.42}}
            }]
        }"#;
        let parsed: TextSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.results[0].name, "Delfina");
        assert_eq!(parsed.results[0].photos[0].photo_reference, "abc");
    }

    #[tokio::test]
    async fn test_noop_search_yields_nothing() {
        let hits = NoopPlaceSearch.search("anything").await.unwrap();
        assert!(hits.is_empty());
    }
}

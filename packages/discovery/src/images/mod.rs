//! Multi-source image resolution.
//!
//! Each candidate gets at most one photo URL, found through an
//! explicit ordered chain of strategies:
//!
//! 1. a supplied URL that survives the reject-list and scheme checks;
//! 2. the candidate's own website (Open Graph, Twitter card, then the
//!    scored `<img>` heuristic in [`website`]);
//! 3. a place-search photo lookup by name and location.
//!
//! Network errors at any step are swallowed and logged; a step that
//! fails simply yields nothing and the chain moves on. When every
//! step yields nothing the outcome is "no real image": the resolver
//! never substitutes a stock photo on its own.

pub mod website;

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::traits::{PageFetcher, PlaceHit, PlaceSearch};

/// Maximum concurrent image lookups across one candidate set.
const MAX_CONCURRENT_LOOKUPS: usize = 4;

/// Photo width requested from the place-search provider.
const PHOTO_MAX_WIDTH: u32 = 400;

/// Substring fragments identifying placeholder and stock-photo hosts.
/// Any supplied URL matching one of these is discarded before the
/// chain runs.
const REJECTED_URL_FRAGMENTS: &[&str] = &[
    "picsum",
    "unsplash",
    "placeholder",
    "via.placeholder",
    "example.com",
    "example.org",
    "lorem",
    "dummy",
];

/// Whether a URL matches the placeholder/stock reject-list.
pub fn is_rejected_image_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    REJECTED_URL_FRAGMENTS.iter().any(|f| lower.contains(f))
}

/// Keep a supplied image URL only if it has a real URL scheme and does
/// not hit the reject-list.
pub fn sanitize_image_url(url: Option<&str>) -> Option<String> {
    let url = url?.trim();
    if url.is_empty() || !url.starts_with("http") {
        return None;
    }
    if is_rejected_image_url(url) {
        tracing::debug!(url = %url, "rejected placeholder image URL");
        return None;
    }
    Some(url.to_string())
}

/// One image-resolution request.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub name: String,
    pub location: String,
    pub website: Option<String>,
    /// URL that already accompanied the candidate, if any.
    pub supplied: Option<String>,
}

/// Prioritized multi-source image resolver.
#[derive(Clone)]
pub struct ImageResolver {
    places: Arc<dyn PlaceSearch>,
    fetcher: Arc<dyn PageFetcher>,
}

impl ImageResolver {
    pub fn new(places: Arc<dyn PlaceSearch>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { places, fetcher }
    }

    /// Run the priority chain for one candidate. `None` means every
    /// step was attempted and yielded nothing.
    pub async fn resolve(
        &self,
        name: &str,
        location: &str,
        website: Option<&str>,
        supplied: Option<&str>,
    ) -> Option<String> {
        if let Some(url) = sanitize_image_url(supplied) {
            return Some(url);
        }

        if let Some(site) = website {
            match self.fetcher.fetch_html(site).await {
                Ok(html) => {
                    if let Some(url) = website::best_image(&html, site, name) {
                        tracing::debug!(name = %name, url = %url, "image found on website");
                        return Some(url);
                    }
                }
                Err(e) => {
                    tracing::debug!(name = %name, site = %site, error = %e, "website image lookup failed");
                }
            }
        }

        match self.places.search(&format!("{name} restaurant {location}")).await {
            Ok(hits) => {
                if let Some(hit) = best_name_match(&hits, name) {
                    if let Some(reference) = hit.photo_references.first() {
                        let url = self.places.photo_url(reference, PHOTO_MAX_WIDTH);
                        if !url.is_empty() {
                            tracing::debug!(name = %name, "image found via place search");
                            return Some(url);
                        }
                    }
                }
            }
            Err(e) => {
                tracing::debug!(name = %name, error = %e, "place photo lookup failed");
            }
        }

        tracing::debug!(name = %name, "no real image found");
        None
    }

    /// Resolve a whole candidate set through a bounded worker pool.
    ///
    /// Output order matches input order regardless of which lookups
    /// finish first.
    pub async fn resolve_all(&self, requests: Vec<ImageRequest>) -> Vec<Option<String>> {
        let total = requests.len();
        let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_LOOKUPS));
        let mut handles = Vec::with_capacity(total);

        for (idx, request) in requests.into_iter().enumerate() {
            let resolver = self.clone();
            let sem = semaphore.clone();
            handles.push(tokio::spawn(async move {
                let _permit = sem.acquire().await.ok()?;
                let url = resolver
                    .resolve(
                        &request.name,
                        &request.location,
                        request.website.as_deref(),
                        request.supplied.as_deref(),
                    )
                    .await;
                Some((idx, url))
            }));
        }

        let mut results: Vec<Option<String>> = vec![None; total];
        for outcome in join_all(handles).await {
            if let Ok(Some((idx, url))) = outcome {
                results[idx] = url;
            }
        }
        results
    }
}

/// Best name-similarity match among place hits: substring containment
/// in either direction, else the first result.
fn best_name_match<'a>(hits: &'a [PlaceHit], name: &str) -> Option<&'a PlaceHit> {
    if hits.is_empty() {
        return None;
    }
    let needle = name.to_lowercase();
    hits.iter()
        .find(|h| {
            let hit_name = h.name.to_lowercase();
            hit_name.contains(&needle) || needle.contains(&hit_name)
        })
        .or_else(|| hits.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_list_is_case_insensitive() {
        assert!(is_rejected_image_url("https://PICSUM.photos/200"));
        assert!(is_rejected_image_url("https://images.unsplash.com/photo-1"));
        assert!(is_rejected_image_url("https://via.placeholder.com/400"));
        assert!(is_rejected_image_url("https://example.com/x.jpg"));
        assert!(is_rejected_image_url("https://cdn.site.com/lorem-food.jpg"));
        assert!(!is_rejected_image_url("https://cdn.realsite.com/food.jpg"));
    }

    #[test]
    fn test_sanitize_requires_scheme() {
        assert_eq!(sanitize_image_url(Some("ftp.site.com/x.jpg")), None);
        assert_eq!(sanitize_image_url(Some("")), None);
        assert_eq!(sanitize_image_url(None), None);
        assert_eq!(
            sanitize_image_url(Some("https://cdn.realsite.com/food.jpg")),
            Some("https://cdn.realsite.com/food.jpg".to_string())
        );
    }

    #[test]
    fn test_sanitize_rejects_placeholder() {
        assert_eq!(sanitize_image_url(Some("https://example.com/x.jpg")), None);
    }

    #[test]
    fn test_best_name_match_substring_either_direction() {
        let hits = vec![
            PlaceHit {
                name: "Unrelated Diner".to_string(),
                ..Default::default()
            },
            PlaceHit {
                name: "Delfina Pizzeria".to_string(),
                ..Default::default()
            },
        ];
        let hit = best_name_match(&hits, "Delfina").unwrap();
        assert_eq!(hit.name, "Delfina Pizzeria");

        // Reverse containment: query longer than hit name.
        let hit = best_name_match(&hits, "Unrelated Diner & Grill").unwrap();
        assert_eq!(hit.name, "Unrelated Diner");
    }

    #[test]
    fn test_best_name_match_falls_back_to_first() {
        let hits = vec![
            PlaceHit {
                name: "Totally Different".to_string(),
                ..Default::default()
            },
            PlaceHit {
                name: "Also Different".to_string(),
                ..Default::default()
            },
        ];
        let hit = best_name_match(&hits, "Delfina").unwrap();
        assert_eq!(hit.name, "Totally Different");
    }

    #[test]
    fn test_best_name_match_empty() {
        assert!(best_name_match(&[], "Delfina").is_none());
    }

    #[tokio::test]
    async fn test_resolver_survives_failing_providers() {
        // Fetch and place search both fail; the chain swallows the
        // errors and reports "no real image".
        let resolver = ImageResolver::new(
            Arc::new(crate::testing::MockPlaceSearch::failing()),
            Arc::new(crate::testing::MockFetcher::new()),
        );
        let url = resolver
            .resolve("Delfina", "San Francisco, CA", Some("https://delfina.test"), None)
            .await;
        assert_eq!(url, None);
    }

    #[tokio::test]
    async fn test_resolve_all_preserves_input_order() {
        let places = crate::testing::MockPlaceSearch::new().with_hit(PlaceHit {
            name: "Anything".to_string(),
            photo_references: vec!["shared-ref".to_string()],
            ..Default::default()
        });
        let resolver = ImageResolver::new(
            Arc::new(places),
            Arc::new(crate::testing::MockFetcher::new()),
        );

        let requests = vec![
            ImageRequest {
                name: "A".to_string(),
                location: "SF".to_string(),
                website: None,
                supplied: Some("https://cdn.a.com/a.jpg".to_string()),
            },
            ImageRequest {
                name: "B".to_string(),
                location: "SF".to_string(),
                website: None,
                supplied: None,
            },
        ];
        let results = resolver.resolve_all(requests).await;
        assert_eq!(results[0].as_deref(), Some("https://cdn.a.com/a.jpg"));
        assert_eq!(
            results[1].as_deref(),
            Some("https://mockplaces.test/photo/shared-ref?w=400")
        );
    }
}

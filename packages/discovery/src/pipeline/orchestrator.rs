//! Pipeline orchestration and graceful degradation.

use std::sync::Arc;

use crate::geo;
use crate::images::ImageResolver;
use crate::traits::{GenerativeModel, PageFetcher, PlaceSearch};
use crate::types::{Restaurant, SearchFilters, SearchResult};

use super::{CandidateDiscoveryStage, EnrichmentStage, ValidationStage};

/// Runs the full discover / enrich / validate sequence for one search.
///
/// Stage failures degrade instead of aborting: a discovery failure
/// yields an empty result with a reason, an enrichment failure falls
/// back to lightly-processed raw candidates, and a validation failure
/// keeps the enriched set without dietary annotations.
pub struct SearchPipeline {
    discovery: CandidateDiscoveryStage,
    enrichment: EnrichmentStage,
    validation: ValidationStage,
}

impl SearchPipeline {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        places: Arc<dyn PlaceSearch>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        let images = ImageResolver::new(places, fetcher);
        Self {
            discovery: CandidateDiscoveryStage::new(model.clone()),
            enrichment: EnrichmentStage::new(model.clone(), images),
            validation: ValidationStage::new(model),
        }
    }

    pub async fn run(&self, location: &str, filters: SearchFilters) -> SearchResult {
        let filters = filters.validated();
        tracing::info!(location = %location, "starting restaurant search");

        let raw = match self.discovery.discover(location, &filters).await {
            Ok(raw) if !raw.is_empty() => raw,
            Ok(_) => {
                tracing::warn!(location = %location, "discovery produced no candidates");
                return SearchResult::empty(
                    location,
                    "No restaurants matching the requested criteria were found.",
                );
            }
            Err(e) => {
                tracing::error!(location = %location, error = %e, "discovery stage failed");
                return SearchResult::empty(
                    location,
                    "The search could not be completed. Please try again.",
                );
            }
        };

        let outcome = match self.enrichment.enrich(location, &raw, &filters).await {
            Ok(outcome) if !outcome.candidates.is_empty() => outcome,
            Ok(_) => {
                tracing::warn!(location = %location, "enrichment kept no candidates");
                return SearchResult::empty(
                    location,
                    "No restaurants matching the requested criteria were found.",
                );
            }
            Err(e) => {
                // Partial results: serve the raw candidates rather
                // than nothing.
                tracing::error!(location = %location, error = %e, "enrichment stage failed");
                let fallback = geo::city_coords(location);
                let restaurants: Vec<Restaurant> = raw
                    .into_iter()
                    .map(|c| Restaurant::from_raw(c, fallback))
                    .collect();
                return SearchResult::new(
                    location,
                    restaurants,
                    "Partial results: candidates could not be fully ranked against your criteria.",
                );
            }
        };

        let summary = outcome
            .summary
            .unwrap_or_else(|| format!("Restaurants found in {location}."));

        let validated = match self
            .validation
            .validate(outcome.candidates.clone(), &filters)
            .await
        {
            Ok(validated) => validated,
            Err(e) => {
                // Keep enriched results without dietary annotations.
                tracing::error!(location = %location, error = %e, "validation stage failed");
                outcome
                    .candidates
                    .into_iter()
                    .map(crate::types::ValidatedCandidate::passthrough)
                    .collect()
            }
        };

        if validated.is_empty() {
            return SearchResult::empty(
                location,
                "No restaurants could be verified against the requested dietary restrictions.",
            );
        }

        let restaurants: Vec<Restaurant> =
            validated.into_iter().map(Restaurant::from_validated).collect();
        tracing::info!(
            location = %location,
            count = restaurants.len(),
            "restaurant search completed"
        );
        SearchResult::new(location, restaurants, summary)
    }
}

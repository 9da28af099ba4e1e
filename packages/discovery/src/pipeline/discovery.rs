//! Stage 1: candidate discovery.

use std::sync::Arc;

use crate::error::Result;
use crate::extract::{extract_json, JsonShape};
use crate::geo;
use crate::prompts;
use crate::traits::GenerativeModel;
use crate::types::{RawCandidate, SearchFilters};

/// Produces raw restaurant candidates for a location and filter set.
pub struct CandidateDiscoveryStage {
    model: Arc<dyn GenerativeModel>,
}

impl CandidateDiscoveryStage {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Ask the generator for 5-8 real establishments and coerce the
    /// response into raw candidates. Provider and parse failures
    /// surface to the caller; individual unparseable entries are
    /// dropped with a warning.
    pub async fn discover(
        &self,
        location: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<RawCandidate>> {
        let prompt = prompts::discovery_prompt(location, filters);
        let raw_text = self.model.generate(&prompt).await?;
        let value = extract_json(&raw_text, JsonShape::Array)?;

        let entries = value.as_array().cloned().unwrap_or_default();
        let fallback = geo::city_coords(location);

        let mut candidates = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<RawCandidate>(entry) {
                Ok(mut candidate) => {
                    if candidate.name.trim().is_empty() {
                        tracing::warn!("dropping candidate with empty name");
                        continue;
                    }
                    if candidate.latitude.is_none() || candidate.longitude.is_none() {
                        candidate.latitude = Some(fallback.0);
                        candidate.longitude = Some(fallback.1);
                    }
                    candidates.push(candidate);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "dropping unparseable candidate entry");
                }
            }
        }

        tracing::info!(
            location = %location,
            count = candidates.len(),
            "discovery stage produced candidates"
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiscoveryError;
    use crate::testing::MockModel;

    #[tokio::test]
    async fn test_discover_parses_candidates() {
        let model = Arc::new(MockModel::new().with_response(
            r#"[
                {"name": "Delfina", "rating": 4.4, "latitude": 37.76, "longitude": -122.42},
                {"name": "Greens", "rating": 4.3}
            ]"#,
        ));
        let stage = CandidateDiscoveryStage::new(model);

        let candidates = stage
            .discover("San Francisco, CA", &SearchFilters::default())
            .await
            .unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "Delfina");
        // Missing coordinates back-filled from the city table.
        assert_eq!(candidates[1].latitude, Some(37.7749));
    }

    #[tokio::test]
    async fn test_discover_drops_nameless_entries() {
        let model = Arc::new(MockModel::new().with_response(
            r#"[{"name": "  "}, {"address": "no name here"}, {"name": "Kept"}]"#,
        ));
        let stage = CandidateDiscoveryStage::new(model);

        let candidates = stage
            .discover("Austin, TX", &SearchFilters::default())
            .await
            .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Kept");
    }

    #[tokio::test]
    async fn test_discover_surfaces_parse_error() {
        let model = Arc::new(MockModel::new().with_response("no json at all"));
        let stage = CandidateDiscoveryStage::new(model);

        let result = stage.discover("Austin, TX", &SearchFilters::default()).await;
        assert!(matches!(result, Err(DiscoveryError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_discover_surfaces_provider_error() {
        let model = Arc::new(MockModel::new().with_failure("quota exceeded"));
        let stage = CandidateDiscoveryStage::new(model);

        let result = stage.discover("Austin, TX", &SearchFilters::default()).await;
        assert!(matches!(result, Err(DiscoveryError::Provider(_))));
    }
}

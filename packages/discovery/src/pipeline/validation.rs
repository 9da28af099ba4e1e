//! Stage 3: dietary validation.
//!
//! Only runs when the filter set carries dietary requirements. The
//! generator re-examines each enriched candidate against the dietary
//! evidence rules and reports a confidence score plus notes; all other
//! fields, images included, stay exactly as enrichment produced them.

use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::extract::{extract_json, JsonShape};
use crate::prompts;
use crate::traits::GenerativeModel;
use crate::types::{EnrichedCandidate, SearchFilters, ValidatedCandidate};

pub struct ValidationStage {
    model: Arc<dyn GenerativeModel>,
}

/// Wire shape of one validation verdict. Only these three fields are
/// read back from the generator; everything else it might emit about a
/// candidate is ignored.
#[derive(Deserialize)]
struct Verdict {
    name: String,
    #[serde(default)]
    dietary_match_confidence: Option<i64>,
    #[serde(default)]
    validation_notes: Option<String>,
}

#[derive(Deserialize)]
struct VerdictResponse {
    #[serde(default)]
    restaurants: Vec<Verdict>,
}

impl ValidationStage {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Validate enriched candidates against dietary requirements.
    ///
    /// With no dietary filters this is an identity passthrough and
    /// makes no generator call. Otherwise candidates the generator
    /// fails to mention are dropped; candidates it invents are
    /// ignored.
    pub async fn validate(
        &self,
        candidates: Vec<EnrichedCandidate>,
        filters: &SearchFilters,
    ) -> Result<Vec<ValidatedCandidate>> {
        if !filters.has_dietary() || candidates.is_empty() {
            return Ok(candidates
                .into_iter()
                .map(ValidatedCandidate::passthrough)
                .collect());
        }

        let prompt = prompts::validation_prompt(&candidates, &filters.dietary);
        let raw_text = self.model.generate(&prompt).await?;
        let value = extract_json(&raw_text, JsonShape::Object)?;
        let response: VerdictResponse =
            serde_json::from_value(value).unwrap_or(VerdictResponse {
                restaurants: Vec::new(),
            });

        let before = candidates.len();
        let mut validated = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let Some(verdict) = find_verdict(&response.restaurants, &candidate.name) else {
                tracing::info!(name = %candidate.name, "candidate failed dietary validation");
                continue;
            };
            validated.push(ValidatedCandidate {
                dietary_match_confidence: verdict
                    .dietary_match_confidence
                    .map(|c| c.clamp(0, 100) as u8),
                validation_notes: verdict.validation_notes.clone(),
                candidate,
            });
        }

        tracing::info!(kept = validated.len(), of = before, "validation stage completed");
        Ok(validated)
    }
}

fn find_verdict<'a>(verdicts: &'a [Verdict], name: &str) -> Option<&'a Verdict> {
    let needle = name.trim().to_lowercase();
    verdicts
        .iter()
        .find(|v| v.name.trim().to_lowercase() == needle)
}

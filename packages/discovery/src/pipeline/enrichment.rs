//! Stage 2: enrichment.
//!
//! The generator filters, scores and annotates the raw candidate set.
//! Everything it says about images is discarded: a deterministic
//! post-pass copies forward the verified image from the matching raw
//! candidate, falls back to the resolver chain, and only as a last
//! resort substitutes a hash-derived placeholder tagged as synthetic.

use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::error::Result;
use crate::extract::{extract_json, JsonShape};
use crate::images::{sanitize_image_url, ImageRequest, ImageResolver};
use crate::prompts;
use crate::traits::GenerativeModel;
use crate::types::{EnrichedCandidate, RawCandidate, ResolvedImage, SearchFilters};

/// Enriched candidates plus the generator's summary of the search.
pub struct EnrichmentOutcome {
    pub candidates: Vec<EnrichedCandidate>,
    pub summary: Option<String>,
}

/// Filters, scores and annotates raw candidates against the full
/// filter set.
pub struct EnrichmentStage {
    model: Arc<dyn GenerativeModel>,
    images: ImageResolver,
}

/// Wire shape of one enriched entry as emitted by the generator.
/// The `image` field is intentionally absent: the model is not
/// trusted with image URLs, so anything it emits there is ignored.
#[derive(Deserialize)]
struct ModelEntry {
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    menu_link: Option<String>,
    #[serde(default)]
    cuisines: Vec<String>,
    #[serde(default)]
    rating: f32,
    #[serde(default)]
    budget: Option<String>,
    #[serde(default)]
    hours: String,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    match_score: i64,
    #[serde(default)]
    matching_menu_items: Vec<String>,
    #[serde(default)]
    why_it_matches: String,
    #[serde(default)]
    accessibility_features: Vec<String>,
    #[serde(default)]
    service_types: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Deserialize)]
struct ModelResponse {
    #[serde(default)]
    restaurants: Vec<serde_json::Value>,
    #[serde(default)]
    search_summary: Option<String>,
}

impl EnrichmentStage {
    pub fn new(model: Arc<dyn GenerativeModel>, images: ImageResolver) -> Self {
        Self { model, images }
    }

    pub async fn enrich(
        &self,
        location: &str,
        raw: &[RawCandidate],
        filters: &SearchFilters,
    ) -> Result<EnrichmentOutcome> {
        let prompt = prompts::enrichment_prompt(location, filters, raw);
        let raw_text = self.model.generate(&prompt).await?;
        let value = extract_json(&raw_text, JsonShape::Object)?;
        let response: ModelResponse =
            serde_json::from_value(value).unwrap_or(ModelResponse {
                restaurants: Vec::new(),
                search_summary: None,
            });

        let mut candidates = Vec::new();
        for entry_value in response.restaurants {
            let entry: ModelEntry = match serde_json::from_value(entry_value) {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(error = %e, "dropping unparseable enriched entry");
                    continue;
                }
            };
            if entry.name.trim().is_empty() {
                continue;
            }

            // Candidates must originate from the discovery output; a
            // name with no raw counterpart is a hallucination.
            let Some((raw_index, original)) = find_by_name(raw, &entry.name) else {
                tracing::warn!(name = %entry.name, "dropping enriched entry with no raw counterpart");
                continue;
            };

            candidates.push((raw_index, build_candidate(entry, original)));
        }

        // Deterministic ordering: match_score descending, ties broken
        // by original discovery order.
        candidates.sort_by(|(ia, a), (ib, b)| {
            b.match_score.cmp(&a.match_score).then(ia.cmp(ib))
        });
        let mut candidates: Vec<EnrichedCandidate> =
            candidates.into_iter().map(|(_, c)| c).collect();

        self.attach_images(location, raw, &mut candidates).await;

        tracing::info!(
            location = %location,
            kept = candidates.len(),
            of = raw.len(),
            "enrichment stage completed"
        );
        Ok(EnrichmentOutcome {
            candidates,
            summary: response.search_summary,
        })
    }

    /// Image post-pass: verified raw image wins, then the resolver
    /// chain, then the tagged synthetic placeholder.
    async fn attach_images(
        &self,
        location: &str,
        raw: &[RawCandidate],
        candidates: &mut [EnrichedCandidate],
    ) {
        let requests: Vec<ImageRequest> = candidates
            .iter()
            .map(|c| {
                let supplied = find_by_name(raw, &c.name)
                    .and_then(|(_, r)| sanitize_image_url(r.image.as_deref()));
                ImageRequest {
                    name: c.name.clone(),
                    location: location.to_string(),
                    website: c.website.clone(),
                    supplied,
                }
            })
            .collect();

        let resolved = self.images.resolve_all(requests).await;
        for (candidate, url) in candidates.iter_mut().zip(resolved) {
            candidate.image = match url {
                Some(u) => ResolvedImage::Verified(u),
                None => ResolvedImage::Synthetic(synthetic_placeholder(&candidate.name)),
            };
        }
    }
}

fn find_by_name<'a>(raw: &'a [RawCandidate], name: &str) -> Option<(usize, &'a RawCandidate)> {
    let needle = name.trim().to_lowercase();
    raw.iter()
        .enumerate()
        .find(|(_, c)| c.name.trim().to_lowercase() == needle)
}

fn build_candidate(entry: ModelEntry, original: &RawCandidate) -> EnrichedCandidate {
    EnrichedCandidate {
        name: original.name.clone(),
        address: non_empty_or(entry.address, &original.address),
        phone: entry.phone.or_else(|| original.phone.clone()),
        website: entry.website.or_else(|| original.website.clone()),
        menu_link: entry.menu_link,
        cuisines: if entry.cuisines.is_empty() {
            original.cuisines.clone()
        } else {
            entry.cuisines
        },
        rating: if entry.rating > 0.0 {
            entry.rating
        } else {
            original.rating
        },
        budget: entry.budget.or_else(|| original.budget.clone()),
        hours: non_empty_or(entry.hours, &original.hours),
        latitude: entry.latitude.or(original.latitude).unwrap_or(0.0),
        longitude: entry.longitude.or(original.longitude).unwrap_or(0.0),
        match_score: entry.match_score.clamp(0, 100) as u8,
        matching_menu_items: if entry.matching_menu_items.is_empty() {
            original.menu_items.clone()
        } else {
            entry.matching_menu_items
        },
        why_it_matches: entry.why_it_matches,
        accessibility_features: entry.accessibility_features,
        service_types: entry.service_types,
        tags: entry.tags,
        image: ResolvedImage::Missing,
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Deterministic last-resort placeholder derived from a hash of the
/// candidate name. Callers tag it [`ResolvedImage::Synthetic`] so it
/// is never mistaken for a real photo.
pub fn synthetic_placeholder(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.trim().to_lowercase().as_bytes());
    let digest = hasher.finalize();
    let seed: String = format!("{digest:x}").chars().take(12).collect();
    format!("https://picsum.photos/seed/{seed}/400/300")
}

//! Candidate records at each pipeline stage of completeness.

use serde::{Deserialize, Serialize};

/// A restaurant candidate as emitted by the discovery stage.
///
/// Field defaults are deliberately permissive: the generation provider
/// is not contractually bound to fill every field, and a candidate is
/// only dropped when its name is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCandidate {
    pub name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub cuisines: Vec<String>,

    /// Rating estimate from the generator; not authoritative.
    #[serde(default)]
    pub rating: f32,

    /// Budget tier symbol as emitted by the generator (e.g. "$$").
    /// Kept as text; the generator occasionally emits free-form bands.
    #[serde(default)]
    pub budget: Option<String>,

    #[serde(default)]
    pub hours: String,

    #[serde(default)]
    pub wheelchair_accessible: bool,

    /// Menu-item strings claimed to match the dietary filters.
    #[serde(default)]
    pub menu_items: Vec<String>,

    /// Back-filled from the coarse city lookup when absent.
    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// Image URL as emitted by the generator. Untrusted until it has
    /// passed the reject-list check.
    #[serde(default)]
    pub image: Option<String>,
}

/// Outcome of image resolution for a candidate.
///
/// `Missing` means resolution was attempted and yielded nothing, which
/// is distinct from a candidate whose image was never looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum ResolvedImage {
    /// A real external URL that passed the reject-list check.
    Verified(String),
    /// A deterministic last-resort placeholder, explicitly marked.
    Synthetic(String),
    /// Resolution ran through the full chain and found nothing.
    Missing,
}

impl ResolvedImage {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Verified(u) | Self::Synthetic(u) => Some(u),
            Self::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// A candidate that survived enrichment: filtered against every
/// requested criterion, scored, and carrying a resolved image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedCandidate {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub menu_link: Option<String>,
    pub cuisines: Vec<String>,
    pub rating: f32,
    pub budget: Option<String>,
    pub hours: String,
    pub latitude: f64,
    pub longitude: f64,

    /// How well the candidate matches all requested filters, 0-100.
    pub match_score: u8,

    /// Subset of the raw menu items judged relevant to the dietary
    /// filters.
    pub matching_menu_items: Vec<String>,

    pub why_it_matches: String,
    pub accessibility_features: Vec<String>,
    pub service_types: Vec<String>,
    pub tags: Vec<String>,

    pub image: ResolvedImage,
}

/// An enriched candidate after dietary validation.
///
/// The confidence and notes are only present when dietary filters were
/// requested; otherwise the enriched record passes through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedCandidate {
    pub candidate: EnrichedCandidate,

    /// Confidence (0-100) that the dietary-accommodation claims hold.
    pub dietary_match_confidence: Option<u8>,

    pub validation_notes: Option<String>,
}

impl ValidatedCandidate {
    /// Wrap an enriched candidate without dietary annotations.
    pub fn passthrough(candidate: EnrichedCandidate) -> Self {
        Self {
            candidate,
            dietary_match_confidence: None,
            validation_notes: None,
        }
    }
}

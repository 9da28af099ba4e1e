//! Consumer-facing search result schema.
//!
//! Serialized field names are camelCase, matching what the HTTP layer
//! in front of this library hands to clients.

use serde::{Deserialize, Serialize};

use super::candidate::{RawCandidate, ResolvedImage, ValidatedCandidate};
use crate::images::sanitize_image_url;

/// Tag appended to a restaurant whose image is a generated
/// placeholder, so consumers can tell it from a real photo after the
/// provenance enum is flattened to a plain URL.
pub const SYNTHETIC_IMAGE_TAG: &str = "synthetic-image";

/// One restaurant in the final result list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f32,
    pub budget: String,
    pub cuisines: Vec<String>,
    pub image: Option<String>,
    pub website: Option<String>,
    pub menu_link: Option<String>,
    pub matching_items: Vec<String>,
    pub phone: Option<String>,
    pub hours: String,
    pub accessibility: Vec<String>,
    pub service_types: Vec<String>,
    pub tags: Vec<String>,
    pub match_score: Option<u8>,
    pub why_it_matches: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_match_confidence: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_notes: Option<String>,
}

impl Restaurant {
    /// Stable id derived from the restaurant name.
    pub fn id_from_name(name: &str) -> String {
        name.trim().to_lowercase().replace(' ', "_")
    }

    /// Build from a fully validated candidate.
    pub fn from_validated(v: ValidatedCandidate) -> Self {
        let c = v.candidate;
        let mut tags = c.tags;
        if matches!(c.image, ResolvedImage::Synthetic(_)) {
            tags.push(SYNTHETIC_IMAGE_TAG.to_string());
        }
        Self {
            id: Self::id_from_name(&c.name),
            name: c.name,
            address: c.address,
            latitude: c.latitude,
            longitude: c.longitude,
            rating: c.rating,
            budget: c.budget.unwrap_or_default(),
            cuisines: c.cuisines,
            image: c.image.url().map(str::to_string),
            website: c.website,
            menu_link: c.menu_link,
            matching_items: c.matching_menu_items,
            phone: c.phone,
            hours: c.hours,
            accessibility: c.accessibility_features,
            service_types: c.service_types,
            tags,
            match_score: Some(c.match_score),
            why_it_matches: Some(c.why_it_matches),
            dietary_match_confidence: v.dietary_match_confidence,
            validation_notes: v.validation_notes,
        }
    }

    /// Build a degraded record from a raw candidate, for partial
    /// results when a later stage failed. No image resolution runs on
    /// this path; only an already-verified supplied URL survives.
    pub fn from_raw(c: RawCandidate, fallback_coords: (f64, f64)) -> Self {
        Self {
            id: Self::id_from_name(&c.name),
            name: c.name,
            address: c.address,
            latitude: c.latitude.unwrap_or(fallback_coords.0),
            longitude: c.longitude.unwrap_or(fallback_coords.1),
            rating: c.rating,
            budget: c.budget.unwrap_or_default(),
            cuisines: c.cuisines,
            image: sanitize_image_url(c.image.as_deref()),
            website: c.website,
            menu_link: None,
            matching_items: c.menu_items,
            phone: c.phone,
            hours: c.hours,
            accessibility: if c.wheelchair_accessible {
                vec!["Wheelchair Accessible".to_string()]
            } else {
                Vec::new()
            },
            service_types: Vec::new(),
            tags: Vec::new(),
            match_score: None,
            why_it_matches: None,
            dietary_match_confidence: None,
            validation_notes: None,
        }
    }
}

/// Final result of one search invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub total_found: usize,
    pub restaurants: Vec<Restaurant>,
    pub location: String,
    pub search_summary: String,
}

impl SearchResult {
    /// An empty result carrying a human-readable reason.
    pub fn empty(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            total_found: 0,
            restaurants: Vec::new(),
            location: location.into(),
            search_summary: reason.into(),
        }
    }

    pub fn new(
        location: impl Into<String>,
        restaurants: Vec<Restaurant>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            total_found: restaurants.len(),
            restaurants,
            location: location.into(),
            search_summary: summary.into(),
        }
    }
}

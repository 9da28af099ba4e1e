//! Domain types for the discovery pipeline.
//!
//! Candidates move through three stages of completeness:
//! [`RawCandidate`] (discovery) → [`EnrichedCandidate`] (enrichment) →
//! [`ValidatedCandidate`] (dietary validation). All of them are
//! ephemeral, created and discarded within a single search.

pub mod candidate;
pub mod filters;
pub mod result;

pub use candidate::{EnrichedCandidate, RawCandidate, ResolvedImage, ValidatedCandidate};
pub use filters::{BudgetTier, SearchFilters};
pub use result::{Restaurant, SearchResult, SYNTHETIC_IMAGE_TAG};

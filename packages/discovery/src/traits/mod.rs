//! Trait seams for external collaborators.
//!
//! Each stage takes these at construction instead of reaching for
//! process-wide state, so tests can substitute deterministic stubs.

pub mod ai;
pub mod fetcher;
pub mod places;

pub use ai::GenerativeModel;
pub use fetcher::PageFetcher;
pub use places::{PlaceHit, PlaceSearch};

//! Restaurant Discovery Library
//!
//! Orchestrates a text-generation provider through a three-stage
//! pipeline to turn a location and a set of preference filters into a
//! ranked, validated restaurant list.
//!
//! # Design Philosophy
//!
//! **"Trust the generator's knowledge, never its artifacts"**
//!
//! - The generator supplies candidates, scores and explanations
//! - Every structural claim is re-parsed, clamped and cross-checked
//! - Image URLs from the generator are never trusted; a deterministic
//!   resolver chain finds real photos or tags a placeholder honestly
//! - Stage failures degrade to partial results, never to a crash
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use discovery::ai::GeminiClient;
//! use discovery::fetch::HttpPageFetcher;
//! use discovery::pipeline::SearchPipeline;
//! use discovery::places::GooglePlacesClient;
//! use discovery::types::SearchFilters;
//!
//! let pipeline = SearchPipeline::new(
//!     Arc::new(GeminiClient::from_env()?),
//!     Arc::new(GooglePlacesClient::new(maps_key)),
//!     Arc::new(HttpPageFetcher::new()),
//! );
//! let result = pipeline.run("San Francisco, CA", SearchFilters::default()).await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Trait seams for external collaborators
//! - [`types`] - Filters, candidates and the result schema
//! - [`pipeline`] - The three stages and their orchestrator
//! - [`images`] - Prioritized multi-source image resolution
//! - [`prompts`] - Prompt composition for each stage
//! - [`extract`] - Tolerant JSON extraction from provider text
//! - [`ai`], [`places`], [`fetch`] - Concrete provider clients
//! - [`testing`] - Scripted mocks for tests

pub mod ai;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod geo;
pub mod images;
pub mod pipeline;
pub mod places;
pub mod prompts;
pub mod testing;
pub mod traits;
pub mod types;

pub use error::{DiscoveryError, Result};
pub use pipeline::SearchPipeline;
pub use types::{Restaurant, SearchFilters, SearchResult};

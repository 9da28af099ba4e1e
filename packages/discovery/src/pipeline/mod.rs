//! The three-stage discovery pipeline and its orchestrator.
//!
//! Each stage is one generator-call-plus-parse unit. Stages run
//! strictly sequentially; the orchestrator degrades gracefully when a
//! stage fails instead of aborting the whole search.

pub mod discovery;
pub mod enrichment;
pub mod orchestrator;
pub mod validation;

pub use discovery::CandidateDiscoveryStage;
pub use enrichment::{EnrichmentOutcome, EnrichmentStage};
pub use orchestrator::SearchPipeline;
pub use validation::ValidationStage;

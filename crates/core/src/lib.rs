//! Core types and configuration for the clinrank reranking engine
//!
//! This crate defines the foundational types used throughout the system:
//! - Candidate, MetadataValue, MetadataFilter: the candidate pool data model
//! - ScoreBreakdown, RankedHit, RankStats, RankResponse: ranking outputs
//! - RankMethod, FusionWeights, RankingConfig: per-call configuration
//! - Error, Result: the error hierarchy
//!
//! No scoring logic lives here; the scorers and the orchestrator are in
//! `clinrank-engine`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{FusionWeights, RankMethod, RankingConfig};
pub use error::{Error, Result};
pub use types::{
    Candidate, MetadataFilter, MetadataValue, RankResponse, RankStats, RankedHit, ScoreBreakdown,
};

//! Scoring and fusion engine for clinrank
//!
//! This crate implements the ranking pipeline behind the public API:
//! - tokenizer: shared query/document tokenization
//! - stats: corpus statistics snapshots and the swappable handle
//! - bm25: the BM25 lexical scorer
//! - semantic: the heuristic semantic scorer and its rule tables
//! - filter: exact-match metadata pre-filtering
//! - fusion: min-max normalization and weighted combination
//! - ranker: the orchestrator tying a call together
//!
//! The public entry point is [`Ranker::rank`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bm25;
pub mod filter;
pub mod fusion;
pub mod ranker;
pub mod semantic;
pub mod stats;
pub mod tokenizer;

pub use bm25::Bm25Scorer;
pub use ranker::Ranker;
pub use semantic::{HeuristicScorer, QueryIntent};
pub use stats::{CorpusStats, StatsHandle};

// Re-export the core types so downstream users need only this crate
pub use clinrank_core::{
    Candidate, Error, FusionWeights, MetadataFilter, MetadataValue, RankMethod, RankResponse,
    RankStats, RankedHit, RankingConfig, Result, ScoreBreakdown,
};

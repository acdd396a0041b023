//! clinrank - Deterministic reranking engine for clinical document retrieval
//!
//! clinrank reorders a pre-retrieved candidate pool for a query using up to
//! three signals: BM25 lexical relevance, a rule-based semantic heuristic,
//! and a caller-supplied vector-similarity score. Six ranking methods select
//! which signals run; active signals are min-max normalized and fused as a
//! weighted mean.
//!
//! # Quick Start
//!
//! ```
//! use clinrank::{Candidate, CorpusStats, RankMethod, Ranker, RankingConfig};
//!
//! let ranker = Ranker::new(CorpusStats::from_texts([
//!     "fasting glucose elevated this morning",
//!     "blood pressure stable on current regimen",
//! ]));
//!
//! let pool = vec![
//!     Candidate::new("note-1#0", "fasting glucose elevated this morning"),
//!     Candidate::new("note-2#0", "blood pressure stable on current regimen"),
//! ];
//!
//! let config = RankingConfig::new(RankMethod::HybridBm25Semantic);
//! let response = ranker.rank("glucose level", &pool, None, &config)?;
//! assert_eq!(response.hits[0].candidate_id, "note-1#0");
//! # Ok::<(), clinrank::Error>(())
//! ```
//!
//! # Architecture
//!
//! All calls go through [`Ranker::rank`], which validates the configuration,
//! applies the metadata filter, runs the active scorers, and fuses the
//! results. The engine holds no candidate state between calls; only the
//! corpus-statistics snapshot persists, swappable through
//! [`Ranker::stats`].

// Re-export the public API from clinrank-engine
pub use clinrank_engine::*;

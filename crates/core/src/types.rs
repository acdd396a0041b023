//! Core data types for ranking calls
//!
//! This module defines the foundational types used throughout the system:
//! - Candidate: one retrievable passage with metadata and an optional vector score
//! - MetadataValue: string-or-number metadata entry with exact-match semantics
//! - MetadataFilter: exact-match constraints applied before scoring
//! - ScoreBreakdown: per-signal scores preserved through the API boundary
//! - RankedHit: one entry of the final ranked list
//! - RankStats: execution diagnostics for a ranking call
//! - RankResponse: ranked hits plus diagnostics
//!
//! All types here are read-only inputs or ephemeral outputs of a single
//! ranking call; none of them is persisted by this engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// MetadataValue
// ============================================================================

/// A single metadata entry value: a string or a number.
///
/// Metadata is produced upstream (chunking/ingestion); this engine only
/// reads it for exact-match filtering and never validates its schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// String-valued entry (e.g., `section = "labs"`)
    Str(String),
    /// Numeric entry (e.g., `position = 3`)
    Num(f64),
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::Str(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::Str(s)
    }
}

impl From<f64> for MetadataValue {
    fn from(n: f64) -> Self {
        MetadataValue::Num(n)
    }
}

impl From<i64> for MetadataValue {
    fn from(n: i64) -> Self {
        MetadataValue::Num(n as f64)
    }
}

/// Exact-match metadata constraints, keyed by metadata field name.
///
/// Ordered so that filter application and serialization are deterministic.
pub type MetadataFilter = BTreeMap<String, MetadataValue>;

// ============================================================================
// Candidate
// ============================================================================

/// One retrievable unit: a text passage plus provenance metadata.
///
/// Candidates arrive already chunked and (for vector methods) already scored
/// by the external vector retriever. This engine treats every field as
/// read-only for the duration of a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Opaque unique identifier (document + chunk composite)
    pub id: String,

    /// Passage content, immutable once created
    pub text: String,

    /// Ordered provenance metadata (e.g., `section`, `source_document`)
    pub metadata: MetadataFilter,

    /// Precomputed vector-similarity score (higher = more similar).
    ///
    /// Absent when the selected method does not use the vector signal.
    pub vector_score: Option<f32>,
}

impl Candidate {
    /// Create a new Candidate with no metadata and no vector score
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Candidate {
            id: id.into(),
            text: text.into(),
            metadata: BTreeMap::new(),
            vector_score: None,
        }
    }

    /// Builder: add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Builder: set the precomputed vector-similarity score
    pub fn with_vector_score(mut self, score: f32) -> Self {
        self.vector_score = Some(score);
        self
    }
}

// ============================================================================
// ScoreBreakdown
// ============================================================================

/// Per-signal score breakdown for one ranked candidate.
///
/// Sub-scores are the raw scorer outputs (before normalization) so callers
/// can display provenance; `combined` is the fused score in [0, 1]. Signals
/// the active method did not run are `None`, not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Raw BM25 lexical score, if the method ran the BM25 scorer
    pub bm25: Option<f32>,

    /// Raw heuristic semantic score, if the method ran the semantic scorer
    pub semantic: Option<f32>,

    /// Caller-supplied vector-similarity score, if the method used it
    pub vector: Option<f32>,

    /// Weighted fusion of the normalized active signals
    pub combined: f32,
}

// ============================================================================
// RankedHit
// ============================================================================

/// A single entry of the final ranked list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHit {
    /// Identifier of the ranked candidate
    pub candidate_id: String,

    /// Fused score (same value as `breakdown.combined`)
    pub score: f32,

    /// Rank in the result set (1-indexed)
    pub rank: u32,

    /// Per-signal provenance, preserved through the boundary
    pub breakdown: ScoreBreakdown,
}

// ============================================================================
// RankStats
// ============================================================================

/// Execution diagnostics for a ranking call
///
/// Per-candidate scoring failures never fail the call; they are only
/// visible here as `scoring_failures`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankStats {
    /// Time spent in the call (microseconds)
    pub elapsed_micros: u64,

    /// Candidates scored after filtering and pool truncation
    pub candidates_considered: usize,

    /// Candidates removed by the metadata filter
    pub filtered_out: usize,

    /// Candidates excluded because a scorer could not score them
    pub scoring_failures: usize,

    /// Candidates dropped because their combined score fell below the threshold
    pub below_threshold: usize,
}

// ============================================================================
// RankResponse
// ============================================================================

/// Result of a ranking call: ranked hits plus execution diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResponse {
    /// Ranked hits, highest combined score first
    pub hits: Vec<RankedHit>,

    /// Execution diagnostics
    pub stats: RankStats,
}

impl RankResponse {
    /// Create an empty response carrying only diagnostics
    pub fn empty(stats: RankStats) -> Self {
        RankResponse { hits: vec![], stats }
    }

    /// Check if the response has no hits
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Number of hits
    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // MetadataValue Tests
    // ========================================

    #[test]
    fn test_metadata_value_from_str() {
        let v: MetadataValue = "labs".into();
        assert_eq!(v, MetadataValue::Str("labs".to_string()));
    }

    #[test]
    fn test_metadata_value_from_numbers() {
        let v: MetadataValue = 3i64.into();
        assert_eq!(v, MetadataValue::Num(3.0));
        let v: MetadataValue = 2.5f64.into();
        assert_eq!(v, MetadataValue::Num(2.5));
    }

    #[test]
    fn test_metadata_value_exact_equality() {
        assert_eq!(MetadataValue::from("labs"), MetadataValue::from("labs"));
        assert_ne!(MetadataValue::from("labs"), MetadataValue::from("notes"));
        assert_ne!(MetadataValue::from("3"), MetadataValue::from(3i64));
    }

    #[test]
    fn test_metadata_value_serde_untagged() {
        let v = MetadataValue::Str("labs".into());
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"labs\"");

        let v = MetadataValue::Num(3.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "3.0");
    }

    // ========================================
    // Candidate Tests
    // ========================================

    #[test]
    fn test_candidate_new() {
        let c = Candidate::new("doc1#0", "fasting glucose was elevated");
        assert_eq!(c.id, "doc1#0");
        assert_eq!(c.text, "fasting glucose was elevated");
        assert!(c.metadata.is_empty());
        assert!(c.vector_score.is_none());
    }

    #[test]
    fn test_candidate_builder() {
        let c = Candidate::new("doc1#0", "text")
            .with_metadata("section", "labs")
            .with_metadata("position", 2i64)
            .with_vector_score(0.87);

        assert_eq!(c.metadata.get("section"), Some(&MetadataValue::from("labs")));
        assert_eq!(c.metadata.get("position"), Some(&MetadataValue::Num(2.0)));
        assert_eq!(c.vector_score, Some(0.87));
    }

    #[test]
    fn test_candidate_metadata_ordered() {
        let c = Candidate::new("doc1#0", "text")
            .with_metadata("zeta", "z")
            .with_metadata("alpha", "a");
        let keys: Vec<_> = c.metadata.keys().cloned().collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }

    // ========================================
    // ScoreBreakdown / RankedHit Tests
    // ========================================

    #[test]
    fn test_breakdown_unused_signals_are_none() {
        let b = ScoreBreakdown {
            bm25: Some(1.2),
            semantic: None,
            vector: None,
            combined: 1.0,
        };
        assert!(b.semantic.is_none());
        assert!(b.vector.is_none());
    }

    #[test]
    fn test_ranked_hit_serde_round_trip() {
        let hit = RankedHit {
            candidate_id: "doc1#0".into(),
            score: 0.75,
            rank: 1,
            breakdown: ScoreBreakdown {
                bm25: Some(2.1),
                semantic: Some(0.4),
                vector: Some(0.9),
                combined: 0.75,
            },
        };
        let json = serde_json::to_string(&hit).unwrap();
        let back: RankedHit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hit);
    }

    // ========================================
    // RankStats / RankResponse Tests
    // ========================================

    #[test]
    fn test_rank_stats_default() {
        let stats = RankStats::default();
        assert_eq!(stats.candidates_considered, 0);
        assert_eq!(stats.filtered_out, 0);
        assert_eq!(stats.scoring_failures, 0);
        assert_eq!(stats.below_threshold, 0);
    }

    #[test]
    fn test_rank_response_empty() {
        let response = RankResponse::empty(RankStats::default());
        assert!(response.is_empty());
        assert_eq!(response.len(), 0);
    }
}

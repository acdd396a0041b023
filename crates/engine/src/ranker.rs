//! Ranking orchestrator
//!
//! This module provides the single `rank` operation: validate the
//! configuration, apply the metadata filter, cap the pool, run the scorers
//! the selected method activates, fuse the normalized sub-scores, apply the
//! score threshold, and return the sorted, truncated result list.
//!
//! # Pipeline
//!
//! ```text
//! RankingConfig + query + candidates
//!        │
//!        ▼
//! ┌─────────────────────────────────────────┐
//! │                Ranker                    │
//! │  validate → filter → pool cap            │
//! │        │                                 │
//! │  ┌─────┴──────────────────────────────┐  │
//! │  │     Score Each Candidate           │  │
//! │  │   ┌──────┐ ┌─────────┐ ┌───────┐   │  │
//! │  │   │ BM25 │ │Semantic │ │Vector │   │  │
//! │  │   └──┬───┘ └────┬────┘ └───┬───┘   │  │
//! │  └──────┼──────────┼──────────┼───────┘  │
//! │         └────── fuse ─────────┘          │
//! │      threshold → sort → truncate         │
//! └────────────────────┼─────────────────────┘
//!                      ▼
//!                RankResponse
//! ```
//!
//! # Stateless calls
//!
//! The Ranker holds only the statistics handle and the immutable rule
//! tables; all per-call state is ephemeral. A call either completes or
//! fails atomically — no partial results are returned on error.

use crate::bm25::Bm25Scorer;
use crate::filter::filter_candidates;
use crate::fusion::{combine, min_max_normalize};
use crate::semantic::HeuristicScorer;
use crate::stats::{CorpusStats, StatsHandle};
use crate::tokenizer::{tokenize, tokenize_unique};
use clinrank_core::{
    Candidate, Error, MetadataFilter, RankResponse, RankStats, RankedHit, RankingConfig, Result,
    ScoreBreakdown,
};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, warn};

// ============================================================================
// Ranker
// ============================================================================

/// Reranking orchestrator
///
/// Owns the corpus-statistics handle; everything else is per-call input.
/// Calls on separate candidate pools may run concurrently without
/// coordination.
#[derive(Debug, Default)]
pub struct Ranker {
    stats: StatsHandle,
    semantic: HeuristicScorer,
}

/// Per-candidate sub-scores gathered before fusion
struct ScoredCandidate<'a> {
    candidate: &'a Candidate,
    bm25: Option<f32>,
    semantic: Option<f32>,
    vector: Option<f32>,
}

impl Ranker {
    /// Create a ranker over an initial statistics snapshot
    pub fn new(stats: CorpusStats) -> Self {
        Ranker {
            stats: StatsHandle::new(stats),
            semantic: HeuristicScorer::new(),
        }
    }

    /// The statistics handle, for the external indexer to publish rebuilds
    pub fn stats(&self) -> &StatsHandle {
        &self.stats
    }

    /// Rank a candidate pool for a query
    ///
    /// Returns at most `config.final_top_k` hits, sorted by combined score
    /// descending with ties broken by input order. Candidates a scorer
    /// cannot score are excluded and counted in
    /// [`RankStats::scoring_failures`]; they never fail the call.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] for a bad configuration, before any
    ///   candidate is touched
    /// - [`Error::EmptyQuery`] when the query text is empty
    pub fn rank(
        &self,
        query_text: &str,
        candidates: &[Candidate],
        filter: Option<&MetadataFilter>,
        config: &RankingConfig,
    ) -> Result<RankResponse> {
        let start = Instant::now();

        config.validate()?;

        if query_text.trim().is_empty() {
            return Err(Error::EmptyQuery {
                method: config.method.as_str(),
            });
        }

        // 1. Metadata filter, then cap the pool at retrieval_pool_size
        let filtered = filter_candidates(candidates, filter);
        let filtered_out = candidates.len() - filtered.len();
        let pool: &[&Candidate] = &filtered[..filtered.len().min(config.retrieval_pool_size)];

        let mut stats = RankStats {
            filtered_out,
            candidates_considered: pool.len(),
            ..RankStats::default()
        };

        if pool.is_empty() {
            debug!(
                query = query_text,
                filtered_out, "candidate pool empty after metadata filter"
            );
            stats.elapsed_micros = start.elapsed().as_micros() as u64;
            return Ok(RankResponse::empty(stats));
        }

        // 2. Score the pool. The snapshot is loaded once so a concurrent
        // statistics rebuild cannot affect this call.
        let corpus = self.stats.load();
        let query_terms = tokenize_unique(query_text);
        let bm25 = Bm25Scorer::new(config.k1, config.b);

        let scored: Vec<Option<ScoredCandidate<'_>>> = pool
            .par_iter()
            .map(|candidate| self.score_candidate(candidate, &query_terms, &bm25, &corpus, config))
            .collect();

        let scored: Vec<ScoredCandidate<'_>> = scored
            .into_iter()
            .filter_map(|result| {
                if result.is_none() {
                    stats.scoring_failures += 1;
                }
                result
            })
            .collect();

        // 3. Fuse: normalize each active column, then weighted mean
        let combined = fuse(&scored, config);

        // 4. Threshold, stable sort, truncate
        let mut entries: Vec<(ScoredCandidate<'_>, f32)> = scored
            .into_iter()
            .zip(combined)
            .filter(|(_, score)| {
                let keep = *score >= config.score_threshold;
                if !keep {
                    stats.below_threshold += 1;
                }
                keep
            })
            .collect();

        // Stable sort: equal combined scores keep their input order
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries.truncate(config.final_top_k);

        let hits = entries
            .into_iter()
            .enumerate()
            .map(|(i, (scored, score))| RankedHit {
                candidate_id: scored.candidate.id.clone(),
                score,
                rank: (i + 1) as u32,
                breakdown: ScoreBreakdown {
                    bm25: scored.bm25,
                    semantic: scored.semantic,
                    vector: scored.vector,
                    combined: score,
                },
            })
            .collect();

        stats.elapsed_micros = start.elapsed().as_micros() as u64;
        Ok(RankResponse { hits, stats })
    }

    /// Run the active scorers for one candidate
    ///
    /// Returns `None` when the candidate cannot be scored under the active
    /// method (missing or non-finite vector score, non-finite scorer
    /// output); the caller counts and skips it.
    fn score_candidate<'a>(
        &self,
        candidate: &'a Candidate,
        query_terms: &[String],
        bm25: &Bm25Scorer,
        corpus: &CorpusStats,
        config: &RankingConfig,
    ) -> Option<ScoredCandidate<'a>> {
        let method = config.method;

        let vector = if method.uses_vector() {
            match candidate.vector_score {
                Some(score) if score.is_finite() => Some(score),
                _ => {
                    warn!(
                        candidate_id = %candidate.id,
                        method = method.as_str(),
                        "candidate excluded: vector method without a usable vector score"
                    );
                    return None;
                }
            }
        } else {
            None
        };

        let doc_terms = if method.uses_bm25() || method.uses_semantic() {
            tokenize(&candidate.text)
        } else {
            Vec::new()
        };

        let bm25_score = method
            .uses_bm25()
            .then(|| bm25.score(query_terms, &doc_terms, corpus));
        let semantic_score = method
            .uses_semantic()
            .then(|| self.semantic.score(query_terms, &doc_terms));

        for score in [bm25_score, semantic_score].into_iter().flatten() {
            if !score.is_finite() {
                warn!(
                    candidate_id = %candidate.id,
                    "candidate excluded: scorer produced a non-finite value"
                );
                return None;
            }
        }

        Some(ScoredCandidate {
            candidate,
            bm25: bm25_score,
            semantic: semantic_score,
            vector,
        })
    }
}

/// Normalize the active columns and combine them into one score per entry
fn fuse(scored: &[ScoredCandidate<'_>], config: &RankingConfig) -> Vec<f32> {
    let method = config.method;
    let mut signals: Vec<(Vec<f32>, f32)> = Vec::with_capacity(3);

    // Missing sub-scores default to 0.0 inside a column, but by
    // construction every surviving candidate has a value for each signal
    // the method activates.
    if method.uses_vector() {
        let column: Vec<f32> = scored.iter().map(|s| s.vector.unwrap_or(0.0)).collect();
        signals.push((min_max_normalize(&column), config.weights.vector));
    }
    if method.uses_bm25() {
        let column: Vec<f32> = scored.iter().map(|s| s.bm25.unwrap_or(0.0)).collect();
        signals.push((min_max_normalize(&column), config.weights.bm25));
    }
    if method.uses_semantic() {
        let column: Vec<f32> = scored.iter().map(|s| s.semantic.unwrap_or(0.0)).collect();
        signals.push((min_max_normalize(&column), config.weights.semantic));
    }

    combine(&signals, scored.len())
}

// ============================================================================
// Tests
// ============================================================================

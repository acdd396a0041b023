//! Corpus-level statistics for BM25 scoring
//!
//! This module provides:
//! - CorpusStats: an immutable snapshot of collection statistics
//!   (document count, average length, per-term document frequency)
//! - StatsHandle: an atomically swappable reference to the current snapshot
//!
//! Statistics are derived from the full indexed corpus by an external
//! indexing step, not from the per-query candidate pool. During a ranking
//! call the snapshot is read-only; a rebuild publishes a whole new snapshot
//! through `StatsHandle::swap`, so in-flight calls keep scoring against the
//! snapshot they loaded and never observe a half-updated statistics object.

use crate::tokenizer::tokenize;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

// ============================================================================
// CorpusStats
// ============================================================================

/// Immutable snapshot of document-collection statistics
///
/// All fields refer to the indexed corpus, tokenized with the same
/// tokenizer used at query time.
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    /// Total documents in the corpus (N in the IDF formula)
    pub total_docs: usize,

    /// Average document length in tokens
    pub avg_doc_len: f32,

    /// Number of documents containing each term
    pub doc_freqs: FxHashMap<String, usize>,
}

impl CorpusStats {
    /// Build statistics from corpus document texts
    ///
    /// Each text is tokenized once; document frequency counts a term at
    /// most once per document.
    pub fn from_texts<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut total_docs = 0usize;
        let mut total_tokens = 0usize;
        let mut doc_freqs: FxHashMap<String, usize> = FxHashMap::default();

        for text in texts {
            total_docs += 1;
            let tokens = tokenize(text);
            total_tokens += tokens.len();

            let mut seen = std::collections::HashSet::new();
            for token in tokens {
                if seen.insert(token.clone()) {
                    *doc_freqs.entry(token).or_insert(0) += 1;
                }
            }
        }

        let avg_doc_len = if total_docs > 0 {
            total_tokens as f32 / total_docs as f32
        } else {
            0.0
        };

        CorpusStats {
            total_docs,
            avg_doc_len,
            doc_freqs,
        }
    }

    /// Number of documents containing `term` (0 for unseen terms)
    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freqs.get(term).copied().unwrap_or(0)
    }

    /// Compute IDF for a term
    ///
    /// Uses the standard smoothed formula:
    /// IDF(t) = ln((N - df + 0.5) / (df + 0.5) + 1)
    pub fn idf(&self, term: &str) -> f32 {
        let df = self.doc_freq(term) as f32;
        let n = self.total_docs as f32;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }
}

// ============================================================================
// StatsHandle
// ============================================================================

/// Atomically swappable reference to the current statistics snapshot
///
/// The external indexer owns rebuilds: it constructs a fresh `CorpusStats`
/// off to the side and publishes it with `swap`. Ranking calls `load` the
/// current `Arc` once per call and score against that snapshot for the
/// whole call.
#[derive(Debug)]
pub struct StatsHandle {
    current: RwLock<Arc<CorpusStats>>,
}

impl StatsHandle {
    /// Create a handle holding an initial snapshot
    pub fn new(stats: CorpusStats) -> Self {
        StatsHandle {
            current: RwLock::new(Arc::new(stats)),
        }
    }

    /// Load the current snapshot
    pub fn load(&self) -> Arc<CorpusStats> {
        Arc::clone(&self.current.read())
    }

    /// Publish a new snapshot, replacing the current one
    ///
    /// In-flight readers keep the `Arc` they already loaded.
    pub fn swap(&self, stats: CorpusStats) {
        *self.current.write() = Arc::new(stats);
    }
}

impl Default for StatsHandle {
    fn default() -> Self {
        StatsHandle::new(CorpusStats::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

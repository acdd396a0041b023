//! BM25 lexical scorer
//!
//! Scores a candidate passage against query terms using the Okapi BM25
//! formula over `CorpusStats`. Scores are raw (not normalized); fusion
//! handles cross-scorer comparison.

use crate::stats::CorpusStats;
use rustc_hash::FxHashMap;

/// BM25 scorer with configurable saturation and length-normalization
///
/// # Formula
///
/// For each query term t:
/// score += IDF(t) * (tf * (k1 + 1)) / (tf + k1 * (1 - b + b * dl/avgdl))
///
/// Where:
/// - tf = term frequency in the candidate
/// - dl = candidate length in tokens
/// - avgdl = corpus average token count
/// - k1 = term saturation parameter (default 1.2)
/// - b = length normalization parameter (default 0.75)
///
/// Terms absent from the candidate contribute zero, so an empty query or
/// an empty candidate scores 0.0 without hitting the length term.
#[derive(Debug, Clone)]
pub struct Bm25Scorer {
    k1: f32,
    b: f32,
}

impl Default for Bm25Scorer {
    fn default() -> Self {
        Bm25Scorer { k1: 1.2, b: 0.75 }
    }
}

impl Bm25Scorer {
    /// Create a scorer with custom parameters
    pub fn new(k1: f32, b: f32) -> Self {
        Bm25Scorer { k1, b }
    }

    /// Score tokenized candidate text against tokenized query terms
    ///
    /// Both sides must come from the shared tokenizer so query terms line
    /// up with the document frequencies inside `stats`.
    pub fn score(&self, query_terms: &[String], doc_terms: &[String], stats: &CorpusStats) -> f32 {
        if query_terms.is_empty() || doc_terms.is_empty() {
            return 0.0;
        }

        let doc_len = doc_terms.len() as f32;
        let avg_len = stats.avg_doc_len.max(1.0);

        let mut term_counts: FxHashMap<&str, usize> = FxHashMap::default();
        for term in doc_terms {
            *term_counts.entry(term.as_str()).or_insert(0) += 1;
        }

        let mut score = 0.0;
        for query_term in query_terms {
            let tf = term_counts.get(query_term.as_str()).copied().unwrap_or(0) as f32;
            if tf == 0.0 {
                continue;
            }

            let idf = stats.idf(query_term);
            let tf_component = (tf * (self.k1 + 1.0))
                / (tf + self.k1 * (1.0 - self.b + self.b * doc_len / avg_len));

            score += idf * tf_component;
        }

        score
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Heuristic semantic scorer
//!
//! A deterministic, rule-based stand-in for a trained cross-encoder:
//! domain-term weighting, query intent classification, and related-term
//! expansion. Pure computation over immutable rule tables; identical inputs
//! always yield identical output.

pub mod intent;
pub mod lexicon;

pub use intent::QueryIntent;
pub use lexicon::{domain_term, related_credit, DomainTerm};

use std::collections::HashSet;

/// Rule-based semantic scorer
///
/// # Algorithm
///
/// 1. Classify the query's intent from its tokens.
/// 2. For every domain term present in both query and candidate, add its
///    base weight, multiplied by the intent multiplier when the term's
///    intent class matches the query intent.
/// 3. For every related pair with one member in the query and the other in
///    the candidate, add the pair's partial credit once.
/// 4. Normalize by the square root of the candidate token count so long
///    passages are not rewarded for volume alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    /// Create a new scorer
    pub fn new() -> Self {
        HeuristicScorer
    }

    /// Score tokenized candidate text against tokenized query terms
    ///
    /// Returns a non-negative score; 0.0 when either side is empty or
    /// nothing in the rule tables fires.
    pub fn score(&self, query_terms: &[String], doc_terms: &[String]) -> f32 {
        if query_terms.is_empty() || doc_terms.is_empty() {
            return 0.0;
        }

        let intent = QueryIntent::classify(query_terms);
        let query_set: HashSet<&str> = query_terms.iter().map(String::as_str).collect();
        let doc_set: HashSet<&str> = doc_terms.iter().map(String::as_str).collect();

        let mut score = 0.0;

        // Direct domain-term matches, intent-weighted
        for term_text in query_set.iter() {
            if !doc_set.contains(term_text) {
                continue;
            }
            if let Some(term) = domain_term(term_text) {
                let multiplier = if term.intent == intent {
                    intent.multiplier()
                } else {
                    1.0
                };
                score += term.weight * multiplier;
            }
        }

        // Related-pair expansion: one member in the query, the other in the
        // candidate. Checked in both directions, each pair credited once.
        for (a, b, credit) in lexicon::RELATED_PAIRS.iter() {
            let forward = query_set.contains(a) && doc_set.contains(b);
            let backward = query_set.contains(b) && doc_set.contains(a);
            if forward || backward {
                score += credit;
            }
        }

        score / (doc_terms.len() as f32).sqrt()
    }
}

// ============================================================================
// Tests
// ============================================================================

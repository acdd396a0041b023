//! Metadata pre-filtering of the candidate pool
//!
//! Runs once per call, before any scoring. A candidate survives when its
//! metadata contains an exactly equal entry for every key in the filter.
//! Filtering never errors: an unmatched filter simply yields an empty pool,
//! which the orchestrator turns into an empty result.

use clinrank_core::{Candidate, MetadataFilter};

/// Apply exact-match metadata constraints to a candidate pool
///
/// Returns references to the surviving candidates in their original order.
/// An absent or empty filter is a no-op. Idempotent: filtering the result
/// again with the same filter changes nothing.
pub fn filter_candidates<'a>(
    pool: &'a [Candidate],
    filter: Option<&MetadataFilter>,
) -> Vec<&'a Candidate> {
    match filter {
        None => pool.iter().collect(),
        Some(constraints) if constraints.is_empty() => pool.iter().collect(),
        Some(constraints) => pool
            .iter()
            .filter(|candidate| matches_filter(candidate, constraints))
            .collect(),
    }
}

/// True when the candidate's metadata satisfies every constraint exactly
fn matches_filter(candidate: &Candidate, constraints: &MetadataFilter) -> bool {
    constraints
        .iter()
        .all(|(key, expected)| candidate.metadata.get(key) == Some(expected))
}

// ============================================================================
// Tests
// ============================================================================

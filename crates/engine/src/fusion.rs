//! Score normalization and weighted fusion
//!
//! Each sub-score used by the active method is independently min-max
//! normalized to [0, 1] across the current candidate pool, then combined as
//! a weighted mean over the active signals. Degenerate pools (a single
//! candidate, or all scores equal) normalize to 1.0 so fusion never divides
//! by zero.

/// Min-max normalize a score column to [0, 1]
///
/// A column whose values are all equal (including a single-element column)
/// maps every entry to 1.0.
pub fn min_max_normalize(scores: &[f32]) -> Vec<f32> {
    if scores.is_empty() {
        return Vec::new();
    }

    let min = scores.iter().copied().fold(f32::INFINITY, f32::min);
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;

    if range <= 0.0 {
        return vec![1.0; scores.len()];
    }

    scores.iter().map(|s| (s - min) / range).collect()
}

/// Combine normalized signal columns into one score per candidate
///
/// `signals` holds one `(normalized_column, weight)` pair per active signal;
/// every column must have `len` entries. The combined score is
/// `sum(norm_i * w_i) / sum(w_i)`, which stays in [0, 1] because each
/// normalized input does.
///
/// The caller guarantees the weight sum is positive (enforced by
/// configuration validation before scoring starts).
pub fn combine(signals: &[(Vec<f32>, f32)], len: usize) -> Vec<f32> {
    let weight_sum: f32 = signals.iter().map(|(_, w)| w).sum();
    debug_assert!(weight_sum > 0.0, "fusion requires a positive weight sum");

    let mut combined = vec![0.0f32; len];
    for (column, weight) in signals {
        debug_assert_eq!(column.len(), len);
        for (slot, norm) in combined.iter_mut().zip(column.iter()) {
            *slot += norm * weight;
        }
    }
    for slot in combined.iter_mut() {
        *slot /= weight_sum;
    }
    combined
}

// ============================================================================
// Tests
// ============================================================================

//! End-to-end ranking pipeline tests
//!
//! Exercises the public `clinrank` API the way a retrieval service would:
//! build a ranker over a corpus snapshot, hand it candidate pools, and check
//! ordering, diagnostics, and failure behavior across all six methods.

use clinrank::{
    Candidate, CorpusStats, Error, FusionWeights, MetadataFilter, RankMethod, Ranker,
    RankingConfig,
};
use proptest::prelude::*;

// ============================================================================
// Fixtures
// ============================================================================

/// Ten-document corpus where exactly one document mentions glucose
fn corpus_docs() -> Vec<&'static str> {
    vec![
        "fasting glucose level elevated this morning",
        "blood pressure stable on current regimen",
        "chest pain resolved without intervention",
        "creatinine trending down after hydration",
        "discharge planning discussed with family",
        "ambulating independently in the hallway",
        "diet advanced as tolerated overnight",
        "wound healing well without drainage",
        "sleep improved after medication change",
        "follow up scheduled with primary care",
    ]
}

fn ranker() -> Ranker {
    Ranker::new(CorpusStats::from_texts(corpus_docs()))
}

fn pool() -> Vec<Candidate> {
    corpus_docs()
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            Candidate::new(format!("note-{i}#0"), text)
                .with_metadata("section", if i < 5 { "assessment" } else { "plan" })
                .with_vector_score(0.1 + 0.08 * i as f32)
        })
        .collect()
}

// ============================================================================
// Core Scenarios
// ============================================================================

#[test]
fn test_bm25_only_ranks_verbatim_match_strictly_first() {
    let ranker = ranker();
    let config = RankingConfig::new(RankMethod::Bm25Only).with_final_top_k(10);

    let response = ranker.rank("glucose level", &pool(), None, &config).unwrap();

    assert_eq!(response.hits[0].candidate_id, "note-0#0");
    assert!(response.hits[0].score > response.hits[1].score);
}

#[test]
fn test_full_hybrid_with_vector_only_weights_matches_vector_order() {
    let ranker = ranker();
    let config = RankingConfig::new(RankMethod::FullHybrid)
        .with_weights(FusionWeights::new(1.0, 0.0, 0.0))
        .with_final_top_k(10);

    let pool = pool();
    let response = ranker.rank("glucose level", &pool, None, &config).unwrap();

    let mut by_vector: Vec<&Candidate> = pool.iter().collect();
    by_vector.sort_by(|a, b| {
        b.vector_score
            .partial_cmp(&a.vector_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let got: Vec<&str> = response
        .hits
        .iter()
        .map(|h| h.candidate_id.as_str())
        .collect();
    let want: Vec<&str> = by_vector.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(got, want);
}

#[test]
fn test_empty_candidate_list_is_empty_result_not_error() {
    let ranker = ranker();
    let config = RankingConfig::new(RankMethod::FullHybrid);

    let response = ranker.rank("glucose level", &[], None, &config).unwrap();
    assert!(response.is_empty());
    assert_eq!(response.stats.candidates_considered, 0);
}

#[test]
fn test_unknown_method_name_fails_at_parse() {
    let err = "not_a_real_method".parse::<RankMethod>().unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

// ============================================================================
// Ordering and Truncation
// ============================================================================

#[test]
fn test_hits_sorted_descending_with_sequential_ranks() {
    let ranker = ranker();
    for method in RankMethod::all() {
        let config = RankingConfig::new(method).with_final_top_k(10);
        let response = ranker.rank("glucose level", &pool(), None, &config).unwrap();

        for window in response.hits.windows(2) {
            assert!(window[0].score >= window[1].score, "method {method:?}");
        }
        for (i, hit) in response.hits.iter().enumerate() {
            assert_eq!(hit.rank, (i + 1) as u32);
        }
    }
}

#[test]
fn test_smaller_top_k_is_prefix_of_larger() {
    let ranker = ranker();
    let wide = RankingConfig::new(RankMethod::FullHybrid).with_final_top_k(10);
    let narrow = RankingConfig::new(RankMethod::FullHybrid).with_final_top_k(3);

    let full = ranker.rank("glucose level", &pool(), None, &wide).unwrap();
    let cut = ranker.rank("glucose level", &pool(), None, &narrow).unwrap();

    assert_eq!(cut.len(), 3);
    for (a, b) in cut.hits.iter().zip(full.hits.iter()) {
        assert_eq!(a.candidate_id, b.candidate_id);
        assert_eq!(a.score, b.score);
    }
}

#[test]
fn test_inactive_weight_changes_do_not_affect_ranking() {
    let ranker = ranker();
    // Bm25Only reads only the bm25 weight; perturbing the others is a no-op
    let base = RankingConfig::new(RankMethod::Bm25Only).with_final_top_k(10);
    let perturbed = RankingConfig::new(RankMethod::Bm25Only)
        .with_weights(FusionWeights::new(9.0, 1.0, 0.001))
        .with_final_top_k(10);

    let a = ranker.rank("glucose level", &pool(), None, &base).unwrap();
    let b = ranker
        .rank("glucose level", &pool(), None, &perturbed)
        .unwrap();
    assert_eq!(a.hits, b.hits);
}

// ============================================================================
// Filtering and Diagnostics
// ============================================================================

#[test]
fn test_metadata_filter_restricts_pool_and_counts() {
    let ranker = ranker();
    let config = RankingConfig::new(RankMethod::Bm25Only).with_final_top_k(10);
    let filter: MetadataFilter = [("section".to_string(), "plan".into())].into();

    let response = ranker
        .rank("glucose level", &pool(), Some(&filter), &config)
        .unwrap();

    assert_eq!(response.stats.filtered_out, 5);
    assert_eq!(response.stats.candidates_considered, 5);
    // The verbatim glucose document lives in "assessment" and is gone
    assert!(response
        .hits
        .iter()
        .all(|h| h.candidate_id != "note-0#0"));
}

#[test]
fn test_unmatched_filter_yields_empty_response() {
    let ranker = ranker();
    let config = RankingConfig::new(RankMethod::Bm25Only);
    let filter: MetadataFilter = [("section".to_string(), "imaging".into())].into();

    let response = ranker
        .rank("glucose level", &pool(), Some(&filter), &config)
        .unwrap();
    assert!(response.is_empty());
    assert_eq!(response.stats.filtered_out, 10);
}

#[test]
fn test_missing_vector_scores_excluded_and_counted() {
    let ranker = ranker();
    let config = RankingConfig::new(RankMethod::VectorBm25).with_final_top_k(10);

    let mut pool = pool();
    pool[3].vector_score = None;
    pool[7].vector_score = Some(f32::NAN);

    let response = ranker.rank("glucose level", &pool, None, &config).unwrap();
    assert_eq!(response.stats.scoring_failures, 2);
    assert_eq!(response.len(), 8);
    for hit in &response.hits {
        assert_ne!(hit.candidate_id, "note-3#0");
        assert_ne!(hit.candidate_id, "note-7#0");
    }
}

#[test]
fn test_threshold_drops_are_counted() {
    let ranker = ranker();
    let config = RankingConfig::new(RankMethod::Bm25Only)
        .with_final_top_k(10)
        .with_score_threshold(0.5);

    let response = ranker.rank("glucose level", &pool(), None, &config).unwrap();

    // Only the verbatim match clears a 0.5 normalized threshold here
    assert_eq!(response.len(), 1);
    assert_eq!(response.stats.below_threshold, 9);
}

#[test]
fn test_breakdown_reflects_active_signals_per_method() {
    let ranker = ranker();
    for method in RankMethod::all() {
        let config = RankingConfig::new(method).with_final_top_k(10);
        let response = ranker.rank("glucose level", &pool(), None, &config).unwrap();

        for hit in &response.hits {
            assert_eq!(hit.breakdown.bm25.is_some(), method.uses_bm25());
            assert_eq!(hit.breakdown.semantic.is_some(), method.uses_semantic());
            assert_eq!(hit.breakdown.vector.is_some(), method.uses_vector());
            assert_eq!(hit.breakdown.combined, hit.score);
        }
    }
}

// ============================================================================
// Error Paths
// ============================================================================

#[test]
fn test_empty_query_rejected_for_every_method() {
    let ranker = ranker();
    for method in RankMethod::all() {
        let config = RankingConfig::new(method);
        let err = ranker.rank("  \t ", &pool(), None, &config).unwrap_err();
        assert!(matches!(err, Error::EmptyQuery { .. }), "method {method:?}");
    }
}

#[test]
fn test_invalid_config_rejected_before_scoring() {
    let ranker = ranker();
    let config = RankingConfig::new(RankMethod::Bm25Only)
        .with_retrieval_pool_size(2)
        .with_final_top_k(5);

    let err = ranker
        .rank("glucose level", &pool(), None, &config)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

// ============================================================================
// Serialization Boundary
// ============================================================================

#[test]
fn test_response_serializes_for_api_callers() {
    let ranker = ranker();
    let config = RankingConfig::new(RankMethod::FullHybrid).with_final_top_k(3);
    let response = ranker.rank("glucose level", &pool(), None, &config).unwrap();

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"hits\""));
    assert!(json.contains("\"stats\""));
    assert!(json.contains("note-0#0"));
}

#[test]
fn test_config_deserializes_from_wire_json() {
    let json = r#"{
        "method": "hybrid_bm25_ce",
        "weights": { "vector": 1.0, "bm25": 2.0, "semantic": 1.5 },
        "retrieval_pool_size": 25,
        "final_top_k": 5,
        "score_threshold": 0.1,
        "k1": 1.2,
        "b": 0.75
    }"#;
    let config: RankingConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.method, RankMethod::HybridBm25Semantic);
    assert!(config.validate().is_ok());
}

// ============================================================================
// Properties
// ============================================================================

const WORDS: &[&str] = &[
    "glucose", "insulin", "diabetes", "pressure", "stable", "elevated", "chest", "pain",
    "regimen", "morning", "creatinine", "discharge",
];

fn arb_candidate() -> impl Strategy<Value = Candidate> {
    (
        prop::collection::vec(0..WORDS.len(), 1..8),
        0.0f32..1.0f32,
        any::<u32>(),
    )
        .prop_map(|(word_idx, vector, id)| {
            let text: Vec<&str> = word_idx.into_iter().map(|i| WORDS[i]).collect();
            Candidate::new(format!("c{id}"), text.join(" ")).with_vector_score(vector)
        })
}

fn arb_query() -> impl Strategy<Value = String> {
    prop::collection::vec(0..WORDS.len(), 1..4)
        .prop_map(|idx| idx.into_iter().map(|i| WORDS[i]).collect::<Vec<_>>().join(" "))
}

proptest! {
    #[test]
    fn prop_hits_bounded_sorted_and_in_unit_interval(
        pool in prop::collection::vec(arb_candidate(), 0..20),
        query in arb_query(),
        top_k in 1usize..8,
    ) {
        let ranker = ranker();
        for method in RankMethod::all() {
            let config = RankingConfig::new(method)
                .with_retrieval_pool_size(50)
                .with_final_top_k(top_k);
            let response = ranker.rank(&query, &pool, None, &config).unwrap();

            prop_assert!(response.len() <= top_k);
            prop_assert!(response.len() <= pool.len());
            for window in response.hits.windows(2) {
                prop_assert!(window[0].score >= window[1].score);
            }
            for hit in &response.hits {
                prop_assert!((0.0..=1.0).contains(&hit.score));
            }
        }
    }

    #[test]
    fn prop_ranking_is_deterministic(
        pool in prop::collection::vec(arb_candidate(), 0..15),
        query in arb_query(),
    ) {
        let ranker = ranker();
        let config = RankingConfig::new(RankMethod::FullHybrid).with_final_top_k(10);
        let first = ranker.rank(&query, &pool, None, &config).unwrap();
        let second = ranker.rank(&query, &pool, None, &config).unwrap();
        prop_assert_eq!(first.hits, second.hits);
    }

    #[test]
    fn prop_diagnostics_partition_the_pool(
        pool in prop::collection::vec(arb_candidate(), 0..20),
        query in arb_query(),
    ) {
        let ranker = ranker();
        let config = RankingConfig::new(RankMethod::HybridBm25Semantic)
            .with_retrieval_pool_size(50)
            .with_final_top_k(50);
        let response = ranker.rank(&query, &pool, None, &config).unwrap();

        // With no filter, no threshold, and no vector requirement, every
        // candidate must come back as a hit.
        prop_assert_eq!(response.stats.filtered_out, 0);
        prop_assert_eq!(response.stats.scoring_failures, 0);
        prop_assert_eq!(response.stats.below_threshold, 0);
        prop_assert_eq!(response.len(), pool.len());
    }
}

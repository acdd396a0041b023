//! Per-call ranking configuration
//!
//! This module defines:
//! - RankMethod: closed enum over the six selectable fusion methods
//! - FusionWeights: per-signal weights for fusion
//! - RankingConfig: immutable per-call configuration with validation
//!
//! Method selection is a closed tagged enum rather than runtime string
//! comparison; the external string names are accepted only at the parsing
//! boundary (`FromStr`), and an unknown name is an `InvalidConfig` error,
//! never a silent default.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// RankMethod
// ============================================================================

/// Fusion method: which scorers a ranking call runs
///
/// The variants are mutually exclusive per call. Each variant knows its
/// active signal set; weights of inactive signals are ignored during fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankMethod {
    /// Pure lexical match (BM25 only)
    #[serde(rename = "bm25_only")]
    Bm25Only,

    /// Pure domain/semantic match (heuristic semantic scorer only).
    ///
    /// External name `cross_encoder_only` is kept for caller compatibility;
    /// the scorer behind it is the deterministic heuristic, not a model.
    #[serde(rename = "cross_encoder_only")]
    SemanticOnly,

    /// BM25 + semantic, for pools without vector scores
    #[serde(rename = "hybrid_bm25_ce")]
    HybridBm25Semantic,

    /// Vector + BM25, cheap hybrid without the semantic pass
    #[serde(rename = "vector_bm25")]
    VectorBm25,

    /// Vector + semantic, cheap hybrid without the lexical pass
    #[serde(rename = "vector_ce")]
    VectorSemantic,

    /// Vector + BM25 + semantic; the default and highest quality
    #[serde(rename = "full_hybrid")]
    FullHybrid,
}

impl Default for RankMethod {
    fn default() -> Self {
        RankMethod::FullHybrid
    }
}

impl RankMethod {
    /// External (wire) name of this method
    pub fn as_str(&self) -> &'static str {
        match self {
            RankMethod::Bm25Only => "bm25_only",
            RankMethod::SemanticOnly => "cross_encoder_only",
            RankMethod::HybridBm25Semantic => "hybrid_bm25_ce",
            RankMethod::VectorBm25 => "vector_bm25",
            RankMethod::VectorSemantic => "vector_ce",
            RankMethod::FullHybrid => "full_hybrid",
        }
    }

    /// Whether this method uses the caller-supplied vector score
    pub fn uses_vector(&self) -> bool {
        matches!(
            self,
            RankMethod::VectorBm25 | RankMethod::VectorSemantic | RankMethod::FullHybrid
        )
    }

    /// Whether this method runs the BM25 lexical scorer
    pub fn uses_bm25(&self) -> bool {
        matches!(
            self,
            RankMethod::Bm25Only
                | RankMethod::HybridBm25Semantic
                | RankMethod::VectorBm25
                | RankMethod::FullHybrid
        )
    }

    /// Whether this method runs the heuristic semantic scorer
    pub fn uses_semantic(&self) -> bool {
        matches!(
            self,
            RankMethod::SemanticOnly
                | RankMethod::HybridBm25Semantic
                | RankMethod::VectorSemantic
                | RankMethod::FullHybrid
        )
    }

    /// All methods, in declaration order
    pub fn all() -> [RankMethod; 6] {
        [
            RankMethod::Bm25Only,
            RankMethod::SemanticOnly,
            RankMethod::HybridBm25Semantic,
            RankMethod::VectorBm25,
            RankMethod::VectorSemantic,
            RankMethod::FullHybrid,
        ]
    }
}

impl FromStr for RankMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bm25_only" => Ok(RankMethod::Bm25Only),
            "cross_encoder_only" => Ok(RankMethod::SemanticOnly),
            "hybrid_bm25_ce" => Ok(RankMethod::HybridBm25Semantic),
            "vector_bm25" => Ok(RankMethod::VectorBm25),
            "vector_ce" => Ok(RankMethod::VectorSemantic),
            "full_hybrid" => Ok(RankMethod::FullHybrid),
            other => Err(Error::InvalidConfig(format!(
                "unknown ranking method: {other:?}"
            ))),
        }
    }
}

// ============================================================================
// FusionWeights
// ============================================================================

/// Per-signal fusion weights
///
/// Weights are non-negative and need not sum to 1; fusion divides by the
/// sum of the weights the active method uses. Weights of inactive signals
/// are ignored entirely, so callers may leave them at their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    /// Weight of the normalized vector-similarity signal
    pub vector: f32,

    /// Weight of the normalized BM25 signal
    pub bm25: f32,

    /// Weight of the normalized semantic signal
    pub semantic: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        FusionWeights {
            vector: 1.0,
            bm25: 1.0,
            semantic: 1.0,
        }
    }
}

impl FusionWeights {
    /// Create weights for the three signals
    pub fn new(vector: f32, bm25: f32, semantic: f32) -> Self {
        FusionWeights {
            vector,
            bm25,
            semantic,
        }
    }
}

// ============================================================================
// RankingConfig
// ============================================================================

/// Immutable per-call ranking configuration
///
/// # Examples
///
/// ```
/// use clinrank_core::config::{RankMethod, RankingConfig};
///
/// let config = RankingConfig::new(RankMethod::Bm25Only)
///     .with_final_top_k(3)
///     .with_retrieval_pool_size(50);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Which scorers to run and fuse
    pub method: RankMethod,

    /// Per-signal fusion weights
    pub weights: FusionWeights,

    /// How many candidates are considered (after filtering) before scoring.
    ///
    /// Must be >= `final_top_k`. A pool smaller than this is used in full.
    pub retrieval_pool_size: usize,

    /// Maximum results to return
    pub final_top_k: usize,

    /// Minimum combined score to be included (default 0.0 = no filtering)
    pub score_threshold: f32,

    /// BM25 term-frequency saturation parameter
    pub k1: f32,

    /// BM25 length-normalization parameter
    pub b: f32,
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig::new(RankMethod::default())
    }
}

impl RankingConfig {
    /// Create a configuration for a method with default tunables
    ///
    /// Defaults: weights 1.0 each, pool size 50, top-k 5, threshold 0.0,
    /// k1 = 1.2, b = 0.75.
    pub fn new(method: RankMethod) -> Self {
        RankingConfig {
            method,
            weights: FusionWeights::default(),
            retrieval_pool_size: 50,
            final_top_k: 5,
            score_threshold: 0.0,
            k1: 1.2,
            b: 0.75,
        }
    }

    /// Builder: set fusion weights
    pub fn with_weights(mut self, weights: FusionWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Builder: set retrieval pool size
    pub fn with_retrieval_pool_size(mut self, size: usize) -> Self {
        self.retrieval_pool_size = size;
        self
    }

    /// Builder: set final top-k
    pub fn with_final_top_k(mut self, k: usize) -> Self {
        self.final_top_k = k;
        self
    }

    /// Builder: set minimum combined score
    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Builder: set BM25 tunables
    pub fn with_bm25_params(mut self, k1: f32, b: f32) -> Self {
        self.k1 = k1;
        self.b = b;
        self
    }

    /// Sum of the weights the active method uses
    pub fn active_weight_sum(&self) -> f32 {
        let mut sum = 0.0;
        if self.method.uses_vector() {
            sum += self.weights.vector;
        }
        if self.method.uses_bm25() {
            sum += self.weights.bm25;
        }
        if self.method.uses_semantic() {
            sum += self.weights.semantic;
        }
        sum
    }

    /// Validate the configuration
    ///
    /// Checked before any scoring; a failure here aborts the call without
    /// touching a single candidate.
    pub fn validate(&self) -> Result<()> {
        if self.final_top_k == 0 {
            return Err(Error::InvalidConfig(
                "final_top_k must be > 0".to_string(),
            ));
        }
        if self.retrieval_pool_size < self.final_top_k {
            return Err(Error::InvalidConfig(format!(
                "retrieval_pool_size ({}) must be >= final_top_k ({})",
                self.retrieval_pool_size, self.final_top_k
            )));
        }
        for (name, w) in [
            ("vector_weight", self.weights.vector),
            ("bm25_weight", self.weights.bm25),
            ("semantic_weight", self.weights.semantic),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative finite number, got {w}"
                )));
            }
        }
        if self.active_weight_sum() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "weights of the signals used by {} sum to zero",
                self.method.as_str()
            )));
        }
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "k1 must be a non-negative finite number, got {}",
                self.k1
            )));
        }
        if !self.b.is_finite() || !(0.0..=1.0).contains(&self.b) {
            return Err(Error::InvalidConfig(format!(
                "b must lie in [0, 1], got {}",
                self.b
            )));
        }
        if !self.score_threshold.is_finite() {
            return Err(Error::InvalidConfig(
                "score_threshold must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

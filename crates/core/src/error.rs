//! Error types for the clinrank reranking engine
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The taxonomy is deliberately small: configuration errors and empty-query
//! rejections abort a ranking call before any scoring; per-candidate scoring
//! failures are absorbed by the orchestrator and surfaced only as diagnostic
//! counts, never as a call-level error.

use thiserror::Error;

/// Result type alias for ranking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the ranking engine
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid per-call configuration: unknown method name, non-positive
    /// result sizes, negative or non-finite weights.
    ///
    /// These are caller bugs and must never be retried automatically.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The selected method scores query text, but the query is empty.
    #[error("Empty query: method {method} requires query text")]
    EmptyQuery {
        /// Canonical name of the method that rejected the query
        method: &'static str,
    },
}

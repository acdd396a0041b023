//! Deterministic tokenizer shared by indexing and query-time scoring
//!
//! BM25 corpus statistics and query-time term matching must tokenize
//! identically, so both go through this module. The scheme is intentionally
//! simple: lowercase, split on non-alphanumeric characters, drop tokens
//! shorter than 2 characters. No stemming.

/// Tokenize text into searchable terms
///
/// # Example
///
/// ```
/// use clinrank_engine::tokenizer::tokenize;
///
/// let tokens = tokenize("Fasting glucose: 7.2 mmol/L");
/// assert_eq!(tokens, vec!["fasting", "glucose", "mmol"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.len() >= 2)
        .map(String::from)
        .collect()
}

/// Tokenize and deduplicate, preserving first-occurrence order
///
/// Used for query terms so a repeated word is not scored twice.
///
/// # Example
///
/// ```
/// use clinrank_engine::tokenizer::tokenize_unique;
///
/// let tokens = tokenize_unique("glucose Glucose GLUCOSE level");
/// assert_eq!(tokens, vec!["glucose", "level"]);
/// ```
pub fn tokenize_unique(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

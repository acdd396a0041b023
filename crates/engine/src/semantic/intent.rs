//! Query intent classification
//!
//! Heuristic categorization of a query's purpose by keyword presence.
//! Intent does not change the score formula; it selects a weight multiplier
//! applied to matched domain terms tagged with that intent class.

/// Purpose of a clinical query, inferred from its wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryIntent {
    /// Asking what a finding means or what causes it
    Diagnostic,
    /// Asking how a condition is managed or medicated
    Treatment,
    /// Asking about a value, level, or reference range
    Measurement,
    /// No dominant intent keywords
    General,
}

/// Keywords signalling a diagnostic question
const DIAGNOSTIC_KEYWORDS: &[&str] = &[
    "diagnosis",
    "diagnosed",
    "diagnose",
    "symptom",
    "symptoms",
    "sign",
    "signs",
    "cause",
    "causes",
    "etiology",
    "differential",
    "indicate",
    "indicates",
    "suggest",
    "suggests",
];

/// Keywords signalling a treatment question
const TREATMENT_KEYWORDS: &[&str] = &[
    "treatment",
    "treat",
    "therapy",
    "medication",
    "drug",
    "dose",
    "dosage",
    "manage",
    "management",
    "prescribed",
    "prescription",
    "regimen",
    "intervention",
];

/// Keywords signalling a measurement question
const MEASUREMENT_KEYWORDS: &[&str] = &[
    "level",
    "levels",
    "value",
    "values",
    "range",
    "normal",
    "elevated",
    "low",
    "high",
    "measure",
    "measurement",
    "count",
    "concentration",
    "reading",
];

impl QueryIntent {
    /// Classify tokenized query terms into an intent
    ///
    /// The class with the most keyword hits wins; ties resolve in the fixed
    /// order diagnostic > treatment > measurement, and zero hits everywhere
    /// is `General`. Fully deterministic for identical inputs.
    pub fn classify(query_terms: &[String]) -> Self {
        let hits = |keywords: &[&str]| {
            query_terms
                .iter()
                .filter(|t| keywords.contains(&t.as_str()))
                .count()
        };

        let diagnostic = hits(DIAGNOSTIC_KEYWORDS);
        let treatment = hits(TREATMENT_KEYWORDS);
        let measurement = hits(MEASUREMENT_KEYWORDS);

        let best = diagnostic.max(treatment).max(measurement);
        if best == 0 {
            QueryIntent::General
        } else if diagnostic == best {
            QueryIntent::Diagnostic
        } else if treatment == best {
            QueryIntent::Treatment
        } else {
            QueryIntent::Measurement
        }
    }

    /// Weight multiplier applied to domain terms tagged with this intent
    pub fn multiplier(self) -> f32 {
        match self {
            QueryIntent::Diagnostic => 1.5,
            QueryIntent::Treatment => 1.4,
            QueryIntent::Measurement => 1.3,
            QueryIntent::General => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize_unique;

    #[test]
    fn test_classify_measurement() {
        let terms = tokenize_unique("what is a normal glucose level");
        assert_eq!(QueryIntent::classify(&terms), QueryIntent::Measurement);
    }

    #[test]
    fn test_classify_treatment() {
        let terms = tokenize_unique("first line treatment for hypertension");
        assert_eq!(QueryIntent::classify(&terms), QueryIntent::Treatment);
    }

    #[test]
    fn test_classify_diagnostic() {
        let terms = tokenize_unique("symptoms that suggest pneumonia");
        assert_eq!(QueryIntent::classify(&terms), QueryIntent::Diagnostic);
    }

    #[test]
    fn test_classify_general_fallback() {
        let terms = tokenize_unique("patient history summary");
        assert_eq!(QueryIntent::classify(&terms), QueryIntent::General);
    }

    #[test]
    fn test_classify_tie_prefers_diagnostic() {
        // One diagnostic keyword, one treatment keyword
        let terms = tokenize_unique("symptoms and treatment");
        assert_eq!(QueryIntent::classify(&terms), QueryIntent::Diagnostic);
    }

    #[test]
    fn test_classify_empty_is_general() {
        assert_eq!(QueryIntent::classify(&[]), QueryIntent::General);
    }

    #[test]
    fn test_multipliers_favor_specific_intents() {
        assert!(QueryIntent::Diagnostic.multiplier() > QueryIntent::General.multiplier());
        assert!(QueryIntent::Treatment.multiplier() > QueryIntent::General.multiplier());
        assert!(QueryIntent::Measurement.multiplier() > QueryIntent::General.multiplier());
        assert_eq!(QueryIntent::General.multiplier(), 1.0);
    }
}

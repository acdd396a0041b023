//! Domain term weights and related-term pairs
//!
//! The rule tables behind the heuristic semantic scorer. Loaded once at
//! first use into immutable statics; never mutated after load, so concurrent
//! ranking calls need no locking.
//!
//! The weights are tunable parameters, not clinical ground truth: clinically
//! significant terms carry more weight than generic vocabulary, and each
//! term is tagged with the intent class whose queries it serves best.

use super::intent::QueryIntent;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A weighted domain term
#[derive(Debug, Clone, Copy)]
pub struct DomainTerm {
    /// Base weight added when the term appears in both query and candidate
    pub weight: f32,
    /// Intent class whose multiplier applies to this term
    pub intent: QueryIntent,
}

const fn term(weight: f32, intent: QueryIntent) -> DomainTerm {
    DomainTerm { weight, intent }
}

/// Domain term → (base weight, intent class)
pub static DOMAIN_TERMS: Lazy<HashMap<&'static str, DomainTerm>> = Lazy::new(|| {
    use QueryIntent::{Diagnostic, Measurement, Treatment};
    HashMap::from([
        // Measurements and lab markers
        ("glucose", term(2.5, Measurement)),
        ("hba1c", term(2.5, Measurement)),
        ("creatinine", term(2.4, Measurement)),
        ("hemoglobin", term(2.3, Measurement)),
        ("troponin", term(2.5, Measurement)),
        ("cholesterol", term(2.2, Measurement)),
        ("ldl", term(2.2, Measurement)),
        ("hdl", term(2.1, Measurement)),
        ("tsh", term(2.4, Measurement)),
        ("inr", term(2.4, Measurement)),
        ("sodium", term(2.0, Measurement)),
        ("potassium", term(2.1, Measurement)),
        ("platelet", term(2.0, Measurement)),
        ("bilirubin", term(2.1, Measurement)),
        ("pressure", term(1.8, Measurement)),
        ("saturation", term(1.9, Measurement)),
        // Conditions
        ("diabetes", term(2.4, Diagnostic)),
        ("hypertension", term(2.3, Diagnostic)),
        ("anemia", term(2.2, Diagnostic)),
        ("pneumonia", term(2.3, Diagnostic)),
        ("asthma", term(2.2, Diagnostic)),
        ("sepsis", term(2.5, Diagnostic)),
        ("stroke", term(2.4, Diagnostic)),
        ("infarction", term(2.5, Diagnostic)),
        ("hypothyroidism", term(2.3, Diagnostic)),
        ("infection", term(2.0, Diagnostic)),
        ("renal", term(2.1, Diagnostic)),
        ("kidney", term(2.0, Diagnostic)),
        ("hepatic", term(2.1, Diagnostic)),
        ("cardiac", term(2.1, Diagnostic)),
        ("fever", term(1.8, Diagnostic)),
        // Treatments and drugs
        ("insulin", term(2.3, Treatment)),
        ("metformin", term(2.3, Treatment)),
        ("warfarin", term(2.4, Treatment)),
        ("statin", term(2.2, Treatment)),
        ("aspirin", term(2.0, Treatment)),
        ("antibiotic", term(2.1, Treatment)),
        ("inhaler", term(2.0, Treatment)),
        ("levothyroxine", term(2.3, Treatment)),
        ("chemotherapy", term(2.4, Treatment)),
        ("dialysis", term(2.3, Treatment)),
    ])
});

/// Related-term pairs with partial credit
///
/// When one member appears in the query and the other in the candidate,
/// the pair's credit is added once. Pairs are unordered; a condition linked
/// to its defining lab marker is the canonical case.
pub static RELATED_PAIRS: Lazy<Vec<(&'static str, &'static str, f32)>> = Lazy::new(|| {
    vec![
        ("diabetes", "glucose", 1.5),
        ("diabetes", "hba1c", 1.8),
        ("diabetes", "insulin", 1.4),
        ("diabetes", "metformin", 1.4),
        ("hypertension", "pressure", 1.6),
        ("anemia", "hemoglobin", 1.8),
        ("hypothyroidism", "tsh", 1.8),
        ("hypothyroidism", "levothyroxine", 1.5),
        ("renal", "creatinine", 1.7),
        ("kidney", "creatinine", 1.6),
        ("kidney", "dialysis", 1.5),
        ("infarction", "troponin", 1.8),
        ("warfarin", "inr", 1.8),
        ("infection", "antibiotic", 1.4),
        ("cholesterol", "statin", 1.5),
        ("asthma", "inhaler", 1.5),
        ("stroke", "aspirin", 1.2),
        ("hepatic", "bilirubin", 1.5),
    ]
});

/// Look up a domain term
pub fn domain_term(term: &str) -> Option<&'static DomainTerm> {
    DOMAIN_TERMS.get(term)
}

/// Credit for a related pair, order-insensitive
pub fn related_credit(a: &str, b: &str) -> Option<f32> {
    RELATED_PAIRS
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, credit)| *credit)
}

use std::collections::BTreeMap;

use super::domain::{RiskCategory, RiskTier, ScoreValue};
use super::tables::RatingTables;

/// Weighted average of the answered scores over the full fixed category
/// table. Unanswered categories count as Poor (1), so the result grows
/// monotonically as answers arrive and never leaves [1.0, 4.0].
pub fn aggregate(scores: &BTreeMap<RiskCategory, ScoreValue>, tables: &RatingTables) -> f64 {
    let weighted: f64 = RiskCategory::ALL
        .into_iter()
        .map(|category| {
            let score = scores
                .get(&category)
                .map(|value| value.get())
                .unwrap_or(ScoreValue::MIN);
            f64::from(score) * tables.category_weight(category)
        })
        .sum();

    // Guard against sub-epsilon drift from the weight sum.
    weighted.clamp(1.0, 4.0)
}

/// Round to the single decimal the quote reports.
pub fn round_to_tenth(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

/// Tier thresholds are closed at the top: exactly 3.5 is Low, exactly 2.5
/// is Medium.
pub fn classify(score: f64) -> RiskTier {
    if score >= 3.5 {
        RiskTier::Low
    } else if score >= 2.5 {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

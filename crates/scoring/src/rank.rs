//! Ranking stage: order by total weighted score and truncate.

use std::cmp::Ordering;

use specrank_model::ScoredRecord;

// NaN totals (only reachable through NaN weights) sink to the bottom.
fn sort_key(record: &ScoredRecord) -> f64 {
    let total = record.total_weighted_score();
    if total.is_nan() {
        f64::NEG_INFINITY
    } else {
        total
    }
}

/// Sort descending by total weighted score and keep the first `top_n`.
///
/// The sort is stable: ties keep their input order.
pub fn rank(mut scored: Vec<ScoredRecord>, top_n: usize) -> Vec<ScoredRecord> {
    scored.sort_by(|a, b| {
        sort_key(b)
            .partial_cmp(&sort_key(a))
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(top_n);
    scored
}

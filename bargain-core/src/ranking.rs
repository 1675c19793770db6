//! Discount computation and final result ordering.

use std::cmp::Ordering;

use crate::model::ScoredResult;

/// Percentage by which `offer_price` undercuts `baseline_price`.
///
/// Defined only when both prices are known and the baseline is strictly
/// positive. Negative when the offer costs more than the baseline.
pub fn discount_pct(offer_price: Option<f64>, baseline_price: Option<f64>) -> Option<f64> {
    let (offer, baseline) = (offer_price?, baseline_price?);
    if baseline <= 0.0 {
        return None;
    }
    Some((baseline - offer) / baseline * 100.0)
}

fn compare(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    match (a.discount_pct, b.discount_pct) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort results in place: known discounts first, largest discount first.
/// Equal entries keep their relative order.
pub fn rank(results: &mut [ScoredResult]) {
    results.sort_by(compare);
}

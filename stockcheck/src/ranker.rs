//! Ranking of evaluated instruments.

use std::cmp::Ordering;

use crate::instrument::Instrument;

/// Sort instruments best first.
///
/// Order: score descending, then the longest-horizon dividend growth
/// descending (missing last), then rated before skipped or pending, then
/// name ascending. The sort is stable and every instrument is kept.
pub fn rank(instruments: &mut [Instrument]) {
    instruments.sort_by(compare);
}

/// Ranking comparator; `Less` means `a` ranks above `b`.
pub fn compare(a: &Instrument, b: &Instrument) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| {
            compare_growth(
                a.metrics.longest_dividend_growth(),
                b.metrics.longest_dividend_growth(),
            )
        })
        .then_with(|| b.is_rated().cmp(&a.is_rated()))
        .then_with(|| a.name.cmp(&b.name))
}

fn compare_growth(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

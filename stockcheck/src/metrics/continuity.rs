//! Dividend continuity count.

use crate::series::YearSample;

/// Number of consecutive year pairs in which the dividend did not fall.
pub fn years_dividend_not_reduced(samples: &[YearSample]) -> u32 {
    samples
        .windows(2)
        .filter(|pair| pair[1].dividend >= pair[0].dividend)
        .count() as u32
}

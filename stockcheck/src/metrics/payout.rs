//! Cumulated payout ratio over the most recent years.

use super::{round_to, MetricError, EPSILON};
use crate::series::YearSample;

const METRIC: &str = "payout ratio";

/// Number of trailing years summed for the payout ratio.
pub const PAYOUT_WINDOW: usize = 3;

/// Dividends as a percentage of earnings, summed over the last three years
/// and rounded to one decimal.
pub fn payout_ratio(samples: &[YearSample]) -> Result<f64, MetricError> {
    MetricError::require(METRIC, PAYOUT_WINDOW, samples.len())?;

    let window = &samples[samples.len() - PAYOUT_WINDOW..];
    let earnings: f64 = window.iter().map(|s| s.earning).sum();
    let dividends: f64 = window.iter().map(|s| s.dividend).sum();

    if earnings <= EPSILON {
        return Err(MetricError::DegenerateInput { metric: METRIC });
    }

    Ok(round_to(100.0 * dividends / earnings, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(pairs: &[(f64, f64)]) -> Vec<YearSample> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(e, d))| YearSample::new(2000 + i as i32, e, d))
            .collect()
    }

    #[test]
    fn test_exactly_three_years() {
        let s = samples(&[(10.0, 5.0), (10.0, 5.0), (10.0, 5.0)]);
        assert_eq!(payout_ratio(&s), Ok(50.0));
    }

    #[test]
    fn test_only_last_three_years_count() {
        let s = samples(&[(1.0, 10.0), (2.0, 1.0), (3.0, 1.0), (5.0, 1.0)]);
        // 3 / 10
        assert_eq!(payout_ratio(&s), Ok(30.0));
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        let s = samples(&[(3.0, 1.0), (3.0, 1.0), (3.0, 0.0)]);
        assert_eq!(payout_ratio(&s), Ok(22.2));
    }

    #[test]
    fn test_two_years_is_insufficient() {
        let s = samples(&[(10.0, 5.0), (10.0, 5.0)]);
        assert!(payout_ratio(&s).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_zero_or_negative_earnings_are_degenerate() {
        let zero = samples(&[(0.0, 1.0), (0.0, 1.0), (0.0, 1.0)]);
        assert_eq!(
            payout_ratio(&zero),
            Err(MetricError::DegenerateInput { metric: METRIC })
        );

        let losses = samples(&[(-2.0, 0.5), (1.0, 0.5), (0.5, 0.5)]);
        assert!(matches!(
            payout_ratio(&losses),
            Err(MetricError::DegenerateInput { .. })
        ));
    }
}

//! Pearson correlation between fiscal year and earnings.

use statrs::statistics::Statistics;

use super::{round_to, MetricError};
use crate::series::YearSample;

const METRIC: &str = "earning correlation";

/// Product of the two deviation norms below which the correlation is not
/// computed.
pub const MIN_DENOMINATOR: f64 = 0.1;

/// Correlation of earnings against the year, rounded to two decimals.
///
/// Works on every sample of the slice. Near-flat earnings (or a single year)
/// give `DegenerateInput` and the caller keeps its previous value.
pub fn earning_correlation(samples: &[YearSample]) -> Result<f64, MetricError> {
    MetricError::require(METRIC, 1, samples.len())?;

    let mean_year = samples.iter().map(|s| f64::from(s.year)).mean();
    let mean_earning = samples.iter().map(|s| s.earning).mean();

    let mut covariance = 0.0;
    let mut earning_sq = 0.0;
    let mut year_sq = 0.0;
    for s in samples {
        let dt = f64::from(s.year) - mean_year;
        let dx = s.earning - mean_earning;
        covariance += dt * dx;
        earning_sq += dx * dx;
        year_sq += dt * dt;
    }

    let denominator = earning_sq.sqrt() * year_sq.sqrt();
    if denominator > MIN_DENOMINATOR {
        Ok(round_to(covariance / denominator, 2))
    } else {
        Err(MetricError::DegenerateInput { metric: METRIC })
    }
}

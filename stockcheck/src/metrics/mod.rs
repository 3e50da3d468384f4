//! Metric calculators.
//!
//! Pure functions over a slice of `YearSample`s. Each one either returns its
//! figure, `InsufficientData` when the slice is too short, or
//! `DegenerateInput` when a denominator is near zero. Neither error is fatal:
//! the evaluator records a remark and decides whether to go on.

pub mod continuity;
pub mod correlation;
pub mod growth;
pub mod payout;

use thiserror::Error;

pub use continuity::years_dividend_not_reduced;
pub use correlation::earning_correlation;
pub use growth::{cagr, growth_figures, GrowthFigures, UNDEFINED_GROWTH};
pub use payout::payout_ratio;

/// Threshold below which a value is treated as zero.
pub const EPSILON: f64 = 1.0e-6;

/// Errors reported by metric calculators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    /// The slice holds fewer samples than the calculator needs.
    #[error("insufficient data: {metric} needs {required} years, got {available}")]
    InsufficientData {
        metric: &'static str,
        required: usize,
        available: usize,
    },

    /// A denominator was too close to zero; the metric stays as it was.
    #[error("degenerate input: {metric} denominator is near zero")]
    DegenerateInput { metric: &'static str },
}

impl MetricError {
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    pub(crate) fn require(
        metric: &'static str,
        required: usize,
        available: usize,
    ) -> Result<(), Self> {
        if available < required {
            Err(Self::InsufficientData {
                metric,
                required,
                available,
            })
        } else {
            Ok(())
        }
    }
}

/// Round to a fixed number of decimal places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

//! Compound annual growth rates of earnings and dividends.

use serde::{Deserialize, Serialize};

use super::{round_to, MetricError, EPSILON};
use crate::series::YearSample;

const METRIC: &str = "growth";

/// Returned by [`cagr`] when no growth rate can be derived.
pub const UNDEFINED_GROWTH: f64 = -2.0;

/// Smallest absolute begin value accepted by [`cagr`].
pub const MIN_BASE: f64 = 0.01;

/// Samples needed for the longest (five year) horizon.
pub const MIN_GROWTH_YEARS: usize = 6;

/// Compound annual growth rate in percent, rounded to one decimal.
///
/// `CAGR = (end / begin)^(1 / years) - 1`
///
/// - `|begin| < MIN_BASE` or `years < 1` gives [`UNDEFINED_GROWTH`].
/// - A sign change between begin and end is penalised with
///   `-|q|^(1/years) - 1` (not a percentage).
pub fn cagr(end: f64, begin: f64, years: i32) -> f64 {
    if begin.abs() < MIN_BASE || years < 1 {
        return UNDEFINED_GROWTH;
    }

    let quotient = end / begin;
    let exponent = 1.0 / f64::from(years);

    if quotient < 0.0 {
        return round_to(-quotient.abs().powf(exponent) - 1.0, 1);
    }

    round_to((quotient.powf(exponent) - 1.0) * 100.0, 1)
}

/// Growth figures taken from the tail of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthFigures {
    pub earning_three_years: f64,
    pub earning_last_year: f64,
    pub dividend_one_year: f64,
    pub dividend_three_years: f64,
    pub dividend_five_years: f64,
    pub dividend_paid_this_year: bool,
}

/// Compute every growth figure for the slice.
///
/// Needs at least [`MIN_GROWTH_YEARS`] samples; each rate compares the last
/// sample with the one `years` positions earlier.
pub fn growth_figures(samples: &[YearSample]) -> Result<GrowthFigures, MetricError> {
    MetricError::require(METRIC, MIN_GROWTH_YEARS, samples.len())?;

    let last = samples.len() - 1;
    let earning = |years: usize| cagr(samples[last].earning, samples[last - years].earning, years as i32);
    let dividend =
        |years: usize| cagr(samples[last].dividend, samples[last - years].dividend, years as i32);

    Ok(GrowthFigures {
        earning_three_years: earning(3),
        earning_last_year: earning(1),
        dividend_one_year: dividend(1),
        dividend_three_years: dividend(3),
        dividend_five_years: dividend(5),
        dividend_paid_this_year: samples[last].dividend > EPSILON,
    })
}

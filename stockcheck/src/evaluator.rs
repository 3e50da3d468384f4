//! Evaluation pipeline.
//!
//! Each instrument goes through `Validate → Calculate → Evaluate → Rate` and
//! ends up either `Rated` or `Skipped`:
//!
//! ```text
//!   Pending ──(history too short)──────────────────────────▶ Skipped
//!      │
//!      ▼
//!   for each period (oldest first):
//!      Calculate ──(InsufficientData)──────────────────────▶ Skipped
//!      Evaluate  → period score
//!      │
//!      ▼
//!   combine period scores → Rate ───────────────────────────▶ Rated
//! ```
//!
//! In three-year mode the periods are the history without its two latest
//! years, without its latest year, and in full. Periods are borrowed slices of
//! the series; the series itself is never modified.

use tracing::{debug, warn};

use crate::config::EvaluationConfig;
use crate::instrument::{EvaluationStatus, Instrument, Metrics};
use crate::metrics::{self, MetricError};
use crate::series::YearSample;

/// Outcome counts of evaluating a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationSummary {
    pub rated: usize,
    pub skipped: usize,
}

/// Runs the evaluation pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluationConfig,
}

impl Evaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Evaluate every instrument of the collection.
    pub fn evaluate_all(&self, instruments: &mut [Instrument]) -> EvaluationSummary {
        let mut summary = EvaluationSummary::default();
        for instrument in instruments.iter_mut() {
            match self.evaluate(instrument) {
                EvaluationStatus::Rated => summary.rated += 1,
                _ => summary.skipped += 1,
            }
        }
        summary
    }

    /// Evaluate one instrument, writing metrics, score, rating and remarks.
    ///
    /// Anything a previous run wrote is reset first (remarks excepted), so
    /// running twice gives the same metrics and rating.
    pub fn evaluate(&self, instrument: &mut Instrument) -> EvaluationStatus {
        instrument.reset_evaluation();

        let available = instrument.series.len();
        let required = self.config.min_years();
        if available < required {
            instrument.add_remark(format!(
                "No evaluation: insufficient data ({} years, {} required)",
                available, required
            ));
            debug!(name = %instrument.name, available, required, "Skipped instrument");
            return self.skip(instrument);
        }

        let policy = self.config.policy;
        let mut period_scores = Vec::with_capacity(self.config.mode.exclusions().len());

        for &excluded in self.config.mode.exclusions() {
            let period = instrument.series.excluding_latest(excluded);
            let result = calculate(period, &mut instrument.metrics, &mut instrument.remarks);

            if let Err(e) = result {
                instrument.add_remark(format!(
                    "No evaluation: {} ({})",
                    e,
                    period_label(period)
                ));
                warn!(name = %instrument.name, error = %e, "Calculation aborted");
                return self.skip(instrument);
            }

            let score = policy.score_period(&instrument.metrics);
            debug!(
                name = %instrument.name,
                period = %period_label(period),
                score,
                "Scored period"
            );
            period_scores.push(score);
        }

        instrument.score = policy.combine(&period_scores);
        instrument.rating = policy.rate(instrument.score, period_scores.len());
        instrument.status = EvaluationStatus::Rated;

        debug!(
            name = %instrument.name,
            score = instrument.score,
            rating = %instrument.rating,
            "Rated instrument"
        );
        EvaluationStatus::Rated
    }

    fn skip(&self, instrument: &mut Instrument) -> EvaluationStatus {
        instrument.reset_evaluation();
        instrument.status = EvaluationStatus::Skipped;
        EvaluationStatus::Skipped
    }
}

/// Run every calculator over one period.
///
/// Degenerate inputs leave the affected metric as it was and add a remark;
/// insufficient data stops the calculation.
fn calculate(
    period: &[YearSample],
    metrics: &mut Metrics,
    remarks: &mut Vec<String>,
) -> Result<(), MetricError> {
    match metrics::earning_correlation(period) {
        Ok(r) => metrics.earning_correlation = Some(r),
        Err(e @ MetricError::DegenerateInput { .. }) => {
            remarks.push(format!("{} ({}), value kept", e, period_label(period)));
        }
        Err(e) => return Err(e),
    }

    let growth = metrics::growth_figures(period)?;
    metrics.apply_growth(growth);

    match metrics::payout_ratio(period) {
        Ok(p) => metrics.payout_ratio = Some(p),
        Err(e @ MetricError::DegenerateInput { .. }) => {
            remarks.push(format!("{} ({}), value kept", e, period_label(period)));
        }
        Err(e) => return Err(e),
    }

    metrics.years_dividend_not_reduced = Some(metrics::years_dividend_not_reduced(period));

    Ok(())
}

/// Human-readable year span of a period, e.g. `2012-2019`.
fn period_label(period: &[YearSample]) -> String {
    match (period.first(), period.last()) {
        (Some(first), Some(last)) => format!("{}-{}", first.year, last.year),
        _ => "empty period".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowMode;
    use crate::instrument::Rating;
    use crate::scoring::ScoringPolicy;

    fn linear(name: &str, years: i32) -> Instrument {
        Instrument::with_samples(
            name,
            (0..years).map(|i| {
                let step = f64::from(i);
                YearSample::new(2010 + i, 1.0 + 0.1 * step, 0.5 + 0.05 * step)
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_short_history_is_skipped() {
        let evaluator = Evaluator::default();
        let mut instrument = linear("SHORT", 7);

        let status = evaluator.evaluate(&mut instrument);

        assert_eq!(status, EvaluationStatus::Skipped);
        assert!(instrument.is_skipped());
        assert_eq!(instrument.rating, Rating::C);
        assert_eq!(instrument.score, 0.0);
        assert_eq!(instrument.metrics, Metrics::default());
        assert_eq!(instrument.remarks.len(), 1);
        assert!(instrument.remarks[0].contains("insufficient data (7 years, 8 required)"));
    }

    #[test]
    fn test_single_mode_needs_six_years() {
        let evaluator = Evaluator::new(EvaluationConfig {
            mode: WindowMode::Single,
            ..Default::default()
        });

        let mut five = linear("FIVE", 5);
        assert_eq!(evaluator.evaluate(&mut five), EvaluationStatus::Skipped);

        let mut six = linear("SIX", 6);
        assert_eq!(evaluator.evaluate(&mut six), EvaluationStatus::Rated);
        assert_eq!(six.score, 5.0);
        assert_eq!(six.rating, Rating::A);
    }

    #[test]
    fn test_single_mode_point_bands_follow_period_count() {
        let evaluator = Evaluator::new(EvaluationConfig {
            mode: WindowMode::Single,
            ..Default::default()
        });

        // flat dividend: no dividend growth, otherwise healthy
        let samples = (0..6).map(|i| YearSample::new(2014 + i, 1.0 + 0.1 * f64::from(i), 0.5));
        let mut flat = Instrument::with_samples("FLAT", samples).unwrap();

        assert_eq!(evaluator.evaluate(&mut flat), EvaluationStatus::Rated);
        assert_eq!(flat.score, 4.0);
        assert_eq!(flat.rating, Rating::B);
    }

    #[test]
    fn test_rising_history_rates_top_band() {
        let evaluator = Evaluator::default();
        let mut instrument = linear("ACME", 8);

        assert_eq!(evaluator.evaluate(&mut instrument), EvaluationStatus::Rated);
        assert_eq!(instrument.score, 15.0);
        assert_eq!(instrument.rating, Rating::A);
        assert_eq!(instrument.metrics.earning_correlation, Some(1.0));
        assert_eq!(instrument.metrics.years_dividend_not_reduced, Some(7));
        assert_eq!(instrument.metrics.payout_ratio, Some(50.0));
        assert!(instrument.remarks.is_empty());
    }

    #[test]
    fn test_metrics_describe_full_history() {
        let evaluator = Evaluator::default();
        let mut instrument = linear("ACME", 8);
        evaluator.evaluate(&mut instrument);

        let samples = instrument.series.get();
        let expected = metrics::cagr(samples[7].dividend, samples[6].dividend, 1);
        assert_eq!(instrument.metrics.dividend_growth_one_year, Some(expected));
        assert_eq!(
            instrument.metrics.dividend_growth_five_years,
            Some(metrics::cagr(samples[7].dividend, samples[2].dividend, 5))
        );
        assert_eq!(instrument.series.len(), 8);
    }

    #[test]
    fn test_flat_earnings_keep_correlation_unset() {
        let evaluator = Evaluator::default();
        let mut instrument = Instrument::with_samples(
            "FLAT",
            (0..8).map(|i| YearSample::new(2000 + i, 2.0, 1.0)),
        )
        .unwrap();

        assert_eq!(evaluator.evaluate(&mut instrument), EvaluationStatus::Rated);
        assert_eq!(instrument.metrics.earning_correlation, None);
        // one remark per period
        assert_eq!(instrument.remarks.len(), 3);
        assert!(instrument.remarks[0].contains("earning correlation"));
        assert!(instrument.remarks[0].contains("2000-2005"));
        // no growth, paid dividend, payout 50%: two points per period
        assert_eq!(instrument.score, 6.0);
        assert_eq!(instrument.rating, Rating::B);
    }

    #[test]
    fn test_degenerate_latest_period_keeps_earlier_value() {
        let evaluator = Evaluator::default();
        // earnings collapse to zero in the last three years
        let earnings = [1.0, 1.2, 1.4, 1.6, 1.8, 0.0, 0.0, 0.0];
        let mut instrument = Instrument::with_samples(
            "ZERO",
            earnings
                .iter()
                .enumerate()
                .map(|(i, &e)| YearSample::new(2010 + i as i32, e, 0.1)),
        )
        .unwrap();

        evaluator.evaluate(&mut instrument);

        // the full history sums to zero earnings, so the middle period's
        // 0.3 / (1.8 + 0.0 + 0.0) survives
        assert_eq!(instrument.metrics.payout_ratio, Some(16.7));
        assert!(instrument
            .remarks
            .iter()
            .any(|r| r.contains("payout ratio") && r.contains("2010-2017")));
    }

    #[test]
    fn test_percentage_policy() {
        let evaluator = Evaluator::new(EvaluationConfig {
            policy: ScoringPolicy::normalized_percentage(),
            ..Default::default()
        });
        let mut instrument = linear("ACME", 8);

        evaluator.evaluate(&mut instrument);

        // continuity 5, 6 and 7 of 10 years, everything else saturated
        assert!((instrument.score - 92.0).abs() < 1e-9);
        assert_eq!(instrument.rating, Rating::A);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let evaluator = Evaluator::default();
        let mut instrument = linear("ACME", 9);

        evaluator.evaluate(&mut instrument);
        let first = (instrument.metrics, instrument.score, instrument.rating);
        evaluator.evaluate(&mut instrument);
        let second = (instrument.metrics, instrument.score, instrument.rating);

        assert_eq!(first, second);
    }

    #[test]
    fn test_evaluate_all_counts() {
        let evaluator = Evaluator::default();
        let mut instruments = vec![linear("A", 8), linear("B", 3), Instrument::new("EMPTY")];

        let summary = evaluator.evaluate_all(&mut instruments);

        assert_eq!(summary, EvaluationSummary { rated: 1, skipped: 2 });
        assert_eq!(instruments.len(), 3);
        assert!(instruments[2].remarks[0].contains("0 years"));
    }

    #[test]
    fn test_unvalidated_config_skips_on_insufficient_growth_data() {
        let evaluator = Evaluator::new(EvaluationConfig {
            min_years_three_year: 3,
            ..Default::default()
        });
        let mut instrument = linear("SHORT", 7);

        assert_eq!(evaluator.evaluate(&mut instrument), EvaluationStatus::Skipped);
        assert_eq!(instrument.metrics, Metrics::default());
        assert!(instrument
            .remarks
            .last()
            .is_some_and(|r| r.contains("growth needs 6 years, got 5")));
    }

    #[test]
    fn test_period_label() {
        assert_eq!(period_label(&[]), "empty period");
        let period = [YearSample::new(2001, 1.0, 0.0), YearSample::new(2004, 1.0, 0.0)];
        assert_eq!(period_label(&period), "2001-2004");
    }
}

//! Scoring policies.
//!
//! Two policies turn a set of metrics into a score. They use different scales
//! and are never mixed within one run:
//!
//! - `DiscretePoints`: one point per criterion met. Period scores are summed,
//!   so three periods yield 0–15 points (0–18 with the continuity criterion).
//!   Point bands are stated for three periods and scale with the number of
//!   periods actually scored.
//! - `NormalizedPercentage`: every component is rescaled into `[0, 1]`, the
//!   components are averaged and reported as 0–100. Period scores are
//!   averaged.

use serde::{Deserialize, Serialize};

use crate::instrument::{Metrics, Rating};
use crate::metrics::EPSILON;

/// Linear rescale of `value` into `[0, 1]` against `[min, max]`.
///
/// A band narrower than `1e-6` is degenerate and scores 0.
pub fn rescale(min: f64, max: f64, value: f64) -> f64 {
    if max - min < EPSILON {
        return 0.0;
    }
    if value <= min {
        return 0.0;
    }
    if value >= max {
        return 1.0;
    }
    (value - min) / (max - min)
}

// ============================================================================
// Rating Bands
// ============================================================================

/// Score thresholds for the top and middle rating bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingBands {
    /// Minimum score for `A`
    pub top: f64,
    /// Minimum score for `B`
    pub middle: f64,
}

impl RatingBands {
    /// Both thresholds multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            top: self.top * factor,
            middle: self.middle * factor,
        }
    }

    pub fn rate(&self, score: f64) -> Rating {
        if score >= self.top {
            Rating::A
        } else if score >= self.middle {
            Rating::B
        } else {
            Rating::C
        }
    }
}

// ============================================================================
// Discrete Points
// ============================================================================

/// Criteria of the discrete point policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointThresholds {
    /// Earnings growth over the last year must exceed this (%)
    #[serde(default = "default_min_growth")]
    pub min_earning_growth: f64,

    /// Minimum earnings/year correlation
    #[serde(default = "default_min_correlation")]
    pub min_correlation: f64,

    /// Dividend growth over the last year must exceed this (%)
    #[serde(default = "default_min_growth")]
    pub min_dividend_growth: f64,

    /// Maximum payout ratio (%)
    #[serde(default = "default_max_payout_ratio")]
    pub max_payout_ratio: f64,

    /// Optional continuity criterion; disabled when unset
    #[serde(default)]
    pub min_years_dividend_not_reduced: Option<u32>,

    #[serde(default = "default_point_bands")]
    pub bands: RatingBands,
}

impl Default for PointThresholds {
    fn default() -> Self {
        Self {
            min_earning_growth: default_min_growth(),
            min_correlation: default_min_correlation(),
            min_dividend_growth: default_min_growth(),
            max_payout_ratio: default_max_payout_ratio(),
            min_years_dividend_not_reduced: None,
            bands: default_point_bands(),
        }
    }
}

fn default_min_growth() -> f64 {
    EPSILON
}

fn default_min_correlation() -> f64 {
    0.7
}

fn default_max_payout_ratio() -> f64 {
    75.0
}

/// Number of summed periods the point bands are stated for.
pub const POINT_BAND_PERIODS: usize = 3;

fn default_point_bands() -> RatingBands {
    // three summed periods of up to five points each
    RatingBands {
        top: 14.0,
        middle: 6.0,
    }
}

impl PointThresholds {
    /// Points earned by one period's metrics.
    pub fn points(&self, metrics: &Metrics) -> f64 {
        let mut points = 0u32;

        if metrics
            .earning_growth_last_year
            .is_some_and(|g| g > self.min_earning_growth)
        {
            points += 1;
        }
        if metrics
            .earning_correlation
            .is_some_and(|c| c >= self.min_correlation)
        {
            points += 1;
        }
        if metrics
            .dividend_growth_one_year
            .is_some_and(|g| g > self.min_dividend_growth)
        {
            points += 1;
        }
        if metrics.dividend_paid_this_year == Some(true) {
            points += 1;
        }
        if metrics
            .payout_ratio
            .is_some_and(|p| p <= self.max_payout_ratio)
        {
            points += 1;
        }
        if let Some(floor) = self.min_years_dividend_not_reduced {
            if metrics
                .years_dividend_not_reduced
                .is_some_and(|years| years >= floor)
            {
                points += 1;
            }
        }

        f64::from(points)
    }

    /// Points available per period.
    pub fn max_points(&self) -> u32 {
        if self.min_years_dividend_not_reduced.is_some() {
            6
        } else {
            5
        }
    }
}

// ============================================================================
// Normalized Percentage
// ============================================================================

/// A `[min, max]` band used for rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn rescale(&self, value: f64) -> f64 {
        rescale(self.min, self.max, value)
    }
}

/// Payout ratios score best at `center` and fall off linearly towards `low`
/// and `high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutCurve {
    pub low: f64,
    pub center: f64,
    pub high: f64,
}

impl Default for PayoutCurve {
    fn default() -> Self {
        Self {
            low: 0.0,
            center: 50.0,
            high: 100.0,
        }
    }
}

impl PayoutCurve {
    pub fn score(&self, payout_ratio: f64) -> f64 {
        let rising = rescale(self.low, self.center, payout_ratio);
        let falling = 1.0 - rescale(self.center, self.high, payout_ratio);
        rising.min(falling)
    }
}

/// Bands of the normalized percentage policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageBands {
    /// Earnings/year correlation
    #[serde(default = "default_correlation_band")]
    pub correlation: Band,

    /// Earnings growth over three years and dividend growth over five years (%)
    #[serde(default = "default_growth_band")]
    pub growth: Band,

    /// Years without a dividend cut
    #[serde(default = "default_continuity_band")]
    pub continuity_years: Band,

    #[serde(default)]
    pub payout: PayoutCurve,

    #[serde(default = "default_percentage_bands")]
    pub bands: RatingBands,
}

impl Default for PercentageBands {
    fn default() -> Self {
        Self {
            correlation: default_correlation_band(),
            growth: default_growth_band(),
            continuity_years: default_continuity_band(),
            payout: PayoutCurve::default(),
            bands: default_percentage_bands(),
        }
    }
}

fn default_correlation_band() -> Band {
    Band::new(0.0, 1.0)
}

fn default_growth_band() -> Band {
    Band::new(0.0, 5.0)
}

fn default_continuity_band() -> Band {
    Band::new(0.0, 10.0)
}

fn default_percentage_bands() -> RatingBands {
    RatingBands {
        top: 80.0,
        middle: 50.0,
    }
}

impl PercentageBands {
    /// Component scores in `[0, 1]`. Missing metrics score 0.
    pub fn components(&self, metrics: &Metrics) -> [f64; 5] {
        [
            metrics
                .earning_correlation
                .map_or(0.0, |c| self.correlation.rescale(c)),
            metrics
                .earning_growth_three_years
                .map_or(0.0, |g| self.growth.rescale(g)),
            metrics
                .dividend_growth_five_years
                .map_or(0.0, |g| self.growth.rescale(g)),
            metrics
                .years_dividend_not_reduced
                .map_or(0.0, |y| self.continuity_years.rescale(f64::from(y))),
            metrics.payout_ratio.map_or(0.0, |p| self.payout.score(p)),
        ]
    }

    /// Percentage (0–100) for one period's metrics.
    pub fn percentage(&self, metrics: &Metrics) -> f64 {
        let components = self.components(metrics);
        100.0 * components.iter().sum::<f64>() / components.len() as f64
    }
}

// ============================================================================
// Scoring Policy
// ============================================================================

/// The policy used to score and rate instruments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringPolicy {
    DiscretePoints(PointThresholds),
    NormalizedPercentage(PercentageBands),
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::DiscretePoints(PointThresholds::default())
    }
}

impl ScoringPolicy {
    pub fn discrete_points() -> Self {
        Self::DiscretePoints(PointThresholds::default())
    }

    pub fn normalized_percentage() -> Self {
        Self::NormalizedPercentage(PercentageBands::default())
    }

    /// Score for one evaluation period.
    pub fn score_period(&self, metrics: &Metrics) -> f64 {
        match self {
            Self::DiscretePoints(thresholds) => thresholds.points(metrics),
            Self::NormalizedPercentage(bands) => bands.percentage(metrics),
        }
    }

    /// Fold per-period scores into the final score.
    pub fn combine(&self, period_scores: &[f64]) -> f64 {
        if period_scores.is_empty() {
            return 0.0;
        }
        let total: f64 = period_scores.iter().sum();
        match self {
            Self::DiscretePoints(_) => total,
            Self::NormalizedPercentage(_) => total / period_scores.len() as f64,
        }
    }

    /// Bands as configured. Point bands are stated for `POINT_BAND_PERIODS`.
    pub fn bands(&self) -> RatingBands {
        match self {
            Self::DiscretePoints(thresholds) => thresholds.bands,
            Self::NormalizedPercentage(bands) => bands.bands,
        }
    }

    /// Bands applicable to a score combined from `periods` periods.
    ///
    /// Summed points grow with the period count, so point bands are scaled by
    /// `periods / POINT_BAND_PERIODS`. Percentages are averaged and need no
    /// scaling.
    pub fn bands_for(&self, periods: usize) -> RatingBands {
        match self {
            Self::DiscretePoints(thresholds) => thresholds
                .bands
                .scaled(periods as f64 / POINT_BAND_PERIODS as f64),
            Self::NormalizedPercentage(bands) => bands.bands,
        }
    }

    /// Highest score reachable when `periods` periods are combined.
    pub fn max_score(&self, periods: usize) -> f64 {
        match self {
            Self::DiscretePoints(thresholds) => {
                f64::from(thresholds.max_points()) * periods as f64
            }
            Self::NormalizedPercentage(_) => 100.0,
        }
    }

    /// Rate a score combined from `periods` periods.
    pub fn rate(&self, score: f64, periods: usize) -> Rating {
        self.bands_for(periods).rate(score)
    }

    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DiscretePoints(_) => "discrete_points",
            Self::NormalizedPercentage(_) => "normalized_percentage",
        }
    }

    /// Unit of the score, for display.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::DiscretePoints(_) => "pts",
            Self::NormalizedPercentage(_) => "%",
        }
    }
}

impl std::str::FromStr for ScoringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "points" | "discrete_points" => Ok(Self::discrete_points()),
            "percentage" | "percent" | "normalized_percentage" => {
                Ok(Self::normalized_percentage())
            }
            _ => Err(format!("Unknown scoring policy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_metrics() -> Metrics {
        Metrics {
            earning_correlation: Some(0.95),
            earning_growth_three_years: Some(6.0),
            earning_growth_last_year: Some(4.0),
            dividend_growth_one_year: Some(3.0),
            dividend_growth_three_years: Some(3.0),
            dividend_growth_five_years: Some(5.5),
            payout_ratio: Some(50.0),
            years_dividend_not_reduced: Some(12),
            dividend_paid_this_year: Some(true),
        }
    }

    #[test]
    fn test_rescale() {
        assert_eq!(rescale(0.0, 10.0, -1.0), 0.0);
        assert_eq!(rescale(0.0, 10.0, 0.0), 0.0);
        assert_eq!(rescale(0.0, 10.0, 2.5), 0.25);
        assert_eq!(rescale(0.0, 10.0, 10.0), 1.0);
        assert_eq!(rescale(0.0, 10.0, 99.0), 1.0);
        assert_eq!(rescale(5.0, 5.0, 7.0), 0.0);
        assert_eq!(rescale(5.0, 1.0, 3.0), 0.0);
    }

    #[test]
    fn test_payout_curve_peaks_at_center() {
        let curve = PayoutCurve::default();
        assert_eq!(curve.score(50.0), 1.0);
        assert_eq!(curve.score(25.0), 0.5);
        assert_eq!(curve.score(75.0), 0.5);
        assert_eq!(curve.score(0.0), 0.0);
        assert_eq!(curve.score(120.0), 0.0);
    }

    #[test]
    fn test_rating_bands() {
        let bands = RatingBands {
            top: 14.0,
            middle: 6.0,
        };
        assert_eq!(bands.rate(15.0), Rating::A);
        assert_eq!(bands.rate(14.0), Rating::A);
        assert_eq!(bands.rate(13.0), Rating::B);
        assert_eq!(bands.rate(6.0), Rating::B);
        assert_eq!(bands.rate(5.0), Rating::C);
    }

    #[test]
    fn test_points_all_criteria() {
        let thresholds = PointThresholds::default();
        assert_eq!(thresholds.points(&healthy_metrics()), 5.0);
        assert_eq!(thresholds.max_points(), 5);
    }

    #[test]
    fn test_points_each_criterion() {
        let thresholds = PointThresholds::default();
        let base = healthy_metrics();

        let mut m = base;
        m.earning_growth_last_year = Some(0.0);
        assert_eq!(thresholds.points(&m), 4.0);

        let mut m = base;
        m.earning_correlation = Some(0.69);
        assert_eq!(thresholds.points(&m), 4.0);

        let mut m = base;
        m.dividend_growth_one_year = Some(-2.0);
        assert_eq!(thresholds.points(&m), 4.0);

        let mut m = base;
        m.dividend_paid_this_year = Some(false);
        assert_eq!(thresholds.points(&m), 4.0);

        let mut m = base;
        m.payout_ratio = Some(75.1);
        assert_eq!(thresholds.points(&m), 4.0);

        let mut m = base;
        m.payout_ratio = Some(75.0);
        assert_eq!(thresholds.points(&m), 5.0);
    }

    #[test]
    fn test_points_missing_metrics_score_nothing() {
        let thresholds = PointThresholds::default();
        assert_eq!(thresholds.points(&Metrics::default()), 0.0);
    }

    #[test]
    fn test_points_continuity_criterion() {
        let thresholds = PointThresholds {
            min_years_dividend_not_reduced: Some(5),
            ..Default::default()
        };
        assert_eq!(thresholds.max_points(), 6);
        assert_eq!(thresholds.points(&healthy_metrics()), 6.0);

        let mut m = healthy_metrics();
        m.years_dividend_not_reduced = Some(4);
        assert_eq!(thresholds.points(&m), 5.0);
    }

    #[test]
    fn test_percentage_components() {
        let bands = PercentageBands::default();
        let components = bands.components(&healthy_metrics());
        assert_eq!(components, [0.95, 1.0, 1.0, 1.0, 1.0]);
        assert!((bands.percentage(&healthy_metrics()) - 99.0).abs() < 1e-9);
        assert_eq!(bands.percentage(&Metrics::default()), 0.0);
    }

    #[test]
    fn test_combine() {
        let points = ScoringPolicy::discrete_points();
        assert_eq!(points.combine(&[5.0, 4.0, 5.0]), 14.0);
        assert_eq!(points.combine(&[]), 0.0);

        let percentage = ScoringPolicy::normalized_percentage();
        assert_eq!(percentage.combine(&[90.0, 80.0, 70.0]), 80.0);
        assert_eq!(percentage.rate(80.0, 3), Rating::A);
        assert_eq!(percentage.rate(79.9, 3), Rating::B);
        assert_eq!(percentage.rate(49.9, 3), Rating::C);
        // averaged, so the period count does not move the bands
        assert_eq!(percentage.rate(80.0, 1), Rating::A);
        assert_eq!(percentage.max_score(1), 100.0);
    }

    #[test]
    fn test_point_bands_scale_with_periods() {
        let points = ScoringPolicy::discrete_points();
        assert_eq!(points.bands_for(3), points.bands());
        assert_eq!(points.rate(14.0, 3), Rating::A);
        assert_eq!(points.rate(13.0, 3), Rating::B);
        assert_eq!(points.rate(5.0, 3), Rating::C);

        // a single perfect period must reach the top band
        assert_eq!(points.max_score(1), 5.0);
        assert_eq!(points.rate(5.0, 1), Rating::A);
        assert_eq!(points.rate(4.0, 1), Rating::B);
        assert_eq!(points.rate(2.0, 1), Rating::B);
        assert_eq!(points.rate(1.0, 1), Rating::C);

        let bands = points.bands_for(1);
        assert!((bands.top - 14.0 / 3.0).abs() < 1e-9);
        assert!((bands.middle - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_max_score() {
        let points = ScoringPolicy::discrete_points();
        assert_eq!(points.max_score(3), 15.0);

        let with_continuity = ScoringPolicy::DiscretePoints(PointThresholds {
            min_years_dividend_not_reduced: Some(5),
            ..Default::default()
        });
        assert_eq!(with_continuity.max_score(3), 18.0);
        assert_eq!(with_continuity.max_score(1), 6.0);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "points".parse::<ScoringPolicy>().unwrap(),
            ScoringPolicy::discrete_points()
        );
        assert_eq!(
            "Percentage".parse::<ScoringPolicy>().unwrap(),
            ScoringPolicy::normalized_percentage()
        );
        assert!("hybrid".parse::<ScoringPolicy>().is_err());
    }

    #[test]
    fn test_policy_serde_tagged() {
        let policy: ScoringPolicy =
            serde_json::from_str(r#"{"kind": "normalized_percentage"}"#).unwrap();
        assert_eq!(policy, ScoringPolicy::normalized_percentage());

        let policy: ScoringPolicy =
            serde_json::from_str(r#"{"kind": "discrete_points", "max_payout_ratio": 60.0}"#)
                .unwrap();
        match policy {
            ScoringPolicy::DiscretePoints(t) => {
                assert_eq!(t.max_payout_ratio, 60.0);
                assert_eq!(t.min_correlation, 0.7);
                assert_eq!(t.bands.top, 14.0);
            }
            other => panic!("unexpected policy {:?}", other),
        }
    }
}

//! Instrument model: history, computed metrics, score and rating.

use serde::{Deserialize, Serialize};

use crate::metrics::GrowthFigures;
use crate::series::{SeriesError, YearSample, YearSeries};

// ============================================================================
// Rating
// ============================================================================

/// Discrete rating band. `C` is the default and the lowest band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    A,
    B,
    #[default]
    C,
}

/// Buy/hold/sell labels used by consumers that prefer recommendations.
///
/// | Rating | Recommendation |
/// |--------|----------------|
/// | A      | Buy            |
/// | B      | Hold           |
/// | C      | Sell           |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

impl Rating {
    pub fn recommendation(self) -> Recommendation {
        match self {
            Self::A => Recommendation::Buy,
            Self::B => Recommendation::Hold,
            Self::C => Recommendation::Sell,
        }
    }
}

impl From<Rating> for Recommendation {
    fn from(rating: Rating) -> Self {
        rating.recommendation()
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Hold => write!(f, "hold"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

// ============================================================================
// Evaluation Status
// ============================================================================

/// Where an instrument stands in the evaluation pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    /// Not evaluated yet
    #[default]
    Pending,
    /// Fully evaluated; rating is meaningful
    Rated,
    /// Evaluation stopped early; see remarks
    Skipped,
}

impl std::fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Rated => write!(f, "rated"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

// ============================================================================
// Metrics
// ============================================================================

/// Computed metrics. `None` means "not computed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Pearson correlation of earnings against year
    pub earning_correlation: Option<f64>,
    /// Earnings CAGR over three years (%)
    pub earning_growth_three_years: Option<f64>,
    /// Earnings growth over the last year (%)
    pub earning_growth_last_year: Option<f64>,
    /// Dividend growth over the last year (%)
    pub dividend_growth_one_year: Option<f64>,
    /// Dividend CAGR over three years (%)
    pub dividend_growth_three_years: Option<f64>,
    /// Dividend CAGR over five years (%)
    pub dividend_growth_five_years: Option<f64>,
    /// Dividends / earnings over the last three years (%)
    pub payout_ratio: Option<f64>,
    /// Year pairs without a dividend cut
    pub years_dividend_not_reduced: Option<u32>,
    /// Whether a dividend was paid in the latest year
    pub dividend_paid_this_year: Option<bool>,
}

impl Metrics {
    pub(crate) fn apply_growth(&mut self, growth: GrowthFigures) {
        self.earning_growth_three_years = Some(growth.earning_three_years);
        self.earning_growth_last_year = Some(growth.earning_last_year);
        self.dividend_growth_one_year = Some(growth.dividend_one_year);
        self.dividend_growth_three_years = Some(growth.dividend_three_years);
        self.dividend_growth_five_years = Some(growth.dividend_five_years);
        self.dividend_paid_this_year = Some(growth.dividend_paid_this_year);
    }

    /// Longest-horizon dividend growth available (5y, else 3y, else 1y).
    pub fn longest_dividend_growth(&self) -> Option<f64> {
        self.dividend_growth_five_years
            .or(self.dividend_growth_three_years)
            .or(self.dividend_growth_one_year)
    }
}

// ============================================================================
// Instrument
// ============================================================================

/// A rated financial instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Instrument name (empty if unset)
    #[serde(default)]
    pub name: String,
    /// Yearly history
    #[serde(default)]
    pub series: YearSeries,
    /// Rating band
    #[serde(default)]
    pub rating: Rating,
    /// Score in points or percent, depending on the scoring policy
    #[serde(default)]
    pub score: f64,
    /// Pipeline state
    #[serde(default)]
    pub status: EvaluationStatus,
    /// Computed metrics
    #[serde(default)]
    pub metrics: Metrics,
    /// Append-only diagnostic log
    #[serde(default)]
    pub remarks: Vec<String>,
}

impl Instrument {
    /// Create an instrument with an empty history.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create an instrument and populate its history.
    pub fn with_samples(
        name: impl Into<String>,
        samples: impl IntoIterator<Item = YearSample>,
    ) -> Result<Self, SeriesError> {
        let mut instrument = Self::new(name);
        instrument.series.set(samples)?;
        Ok(instrument)
    }

    pub fn add_remark(&mut self, remark: impl Into<String>) {
        self.remarks.push(remark.into());
    }

    pub fn is_rated(&self) -> bool {
        self.status == EvaluationStatus::Rated
    }

    pub fn is_skipped(&self) -> bool {
        self.status == EvaluationStatus::Skipped
    }

    pub fn recommendation(&self) -> Recommendation {
        self.rating.recommendation()
    }

    /// Drop everything a previous evaluation wrote, except remarks.
    pub(crate) fn reset_evaluation(&mut self) {
        self.metrics = Metrics::default();
        self.score = 0.0;
        self.rating = Rating::default();
        self.status = EvaluationStatus::Pending;
    }
}

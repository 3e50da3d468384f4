//! Rating run facade: load → evaluate → rank.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use stockcheck_common::logging::generate_run_id;

use crate::config::EvaluationConfig;
use crate::evaluator::Evaluator;
use crate::instrument::{Instrument, Rating};
use crate::provider::DataProvider;
use crate::ranker;

// ============================================================================
// Rating Run
// ============================================================================

/// Result of one rating run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRun {
    /// Run ID
    pub id: String,
    /// Provider the instruments came from
    pub source: String,
    /// Scoring policy name
    pub policy: String,
    /// Score unit ("pts" or "%")
    pub unit: String,
    /// Ranked instruments, best first
    pub instruments: Vec<Instrument>,
    /// Instruments loaded
    pub total: usize,
    /// Instruments rated
    pub rated: usize,
    /// Instruments skipped
    pub skipped: usize,
    /// Start time
    pub started_at: DateTime<Utc>,
    /// End time
    pub completed_at: DateTime<Utc>,
    /// Duration in seconds
    pub duration_secs: f64,
}

impl RatingRun {
    /// Get the top N instruments.
    pub fn top(&self, n: usize) -> Vec<&Instrument> {
        self.instruments.iter().take(n).collect()
    }

    /// Rated instruments in a given band, in rank order.
    pub fn with_rating(&self, rating: Rating) -> Vec<&Instrument> {
        self.instruments
            .iter()
            .filter(|i| i.is_rated() && i.rating == rating)
            .collect()
    }

    /// Summary string for logging.
    pub fn summary(&self) -> String {
        format!(
            "Rated {} of {} instruments in {:.1}s ({} skipped, {} A / {} B / {} C)",
            self.rated,
            self.total,
            self.duration_secs,
            self.skipped,
            self.with_rating(Rating::A).len(),
            self.with_rating(Rating::B).len(),
            self.with_rating(Rating::C).len(),
        )
    }
}

// ============================================================================
// Stockcheck
// ============================================================================

/// Runs the rating pipeline over everything a provider supplies.
pub struct StockCheck<P: DataProvider> {
    provider: P,
    evaluator: Evaluator,
}

impl<P: DataProvider> StockCheck<P> {
    pub fn new(provider: P, config: EvaluationConfig) -> Self {
        Self {
            provider,
            evaluator: Evaluator::new(config),
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Load, evaluate and rank all instruments.
    pub fn run(&self) -> Result<RatingRun> {
        let started_at = Utc::now();
        let id = generate_run_id();
        let policy = self.evaluator.config().policy;

        info!(
            run_id = %id,
            source = self.provider.name(),
            policy = policy.name(),
            mode = %self.evaluator.config().mode,
            "Starting rating run"
        );

        let mut instruments = self
            .provider
            .load_instruments()
            .with_context(|| format!("Failed to load instruments from {}", self.provider.name()))?;

        let summary = self.evaluator.evaluate_all(&mut instruments);
        ranker::rank(&mut instruments);

        let completed_at = Utc::now();
        let duration_secs = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        let run = RatingRun {
            id,
            source: self.provider.name().to_string(),
            policy: policy.name().to_string(),
            unit: policy.unit().to_string(),
            total: instruments.len(),
            rated: summary.rated,
            skipped: summary.skipped,
            instruments,
            started_at,
            completed_at,
            duration_secs,
        };

        info!(run_id = %run.id, "{}", run.summary());
        Ok(run)
    }
}

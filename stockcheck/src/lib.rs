//! Stockcheck Library
//!
//! Rates and ranks dividend stocks from their multi-year earnings and
//! dividend history.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌───────────┐   ┌────────┐   ┌────────┐
//! │ Provider │──▶│ YearSeries │──▶│ Evaluator │──▶│ Ranker │──▶│ Report │
//! └──────────┘   └────────────┘   └───────────┘   └────────┘   └────────┘
//!                                   │
//!                                   ├─ metrics (correlation, CAGR, payout, continuity)
//!                                   └─ scoring policy (points or percentage)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use stockcheck::{EvaluationConfig, SqliteProvider, StockCheck};
//!
//! let run = StockCheck::new(SqliteProvider::new("stocks.db"), EvaluationConfig::default())
//!     .run()?;
//! for instrument in run.top(10) {
//!     println!("{} {} {:.1}", instrument.name, instrument.rating, instrument.score);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod evaluator;
pub mod instrument;
pub mod metrics;
pub mod provider;
pub mod ranker;
pub mod report;
pub mod run;
pub mod scoring;
pub mod series;

pub use config::{EvaluationConfig, OutputConfig, SourceConfig, StockcheckConfig, WindowMode};
pub use evaluator::{EvaluationSummary, Evaluator};
pub use instrument::{EvaluationStatus, Instrument, Metrics, Rating, Recommendation};
pub use metrics::MetricError;
pub use provider::{DataProvider, SqliteProvider, StaticProvider};
pub use ranker::rank;
pub use report::{RatingReport, ReportFormat};
pub use run::{RatingRun, StockCheck};
pub use scoring::{PercentageBands, PointThresholds, RatingBands, ScoringPolicy};
pub use series::{SeriesError, YearSample, YearSeries};

//! Stockcheck configuration.
//!
//! Loaded from `~/.stockcheck/config.json` (or an explicit path); every
//! field has a default so a missing file or a partial file both work.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use stockcheck_common::config::{config_dir, config_path, env_override, load_json_file};
use stockcheck_common::validation::collect_errors;
use stockcheck_common::{ObservabilityConfig, Validate, ValidationError, ValidationResult};

use crate::report::ReportFormat;
use crate::scoring::{RatingBands, ScoringPolicy};

/// Environment variable overriding `source.db_path`.
pub const ENV_DB_PATH: &str = "STOCKCHECK_DB";

/// Environment variable overriding `observability.log_level`.
pub const ENV_LOG_LEVEL: &str = "STOCKCHECK_LOG_LEVEL";

// ============================================================================
// Main Configuration
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockcheckConfig {
    #[serde(default)]
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub evaluation: EvaluationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl StockcheckConfig {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        let path = config_path();
        match load_json_file(&path)? {
            Some(config) => Ok(config),
            None => {
                tracing::debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        load_json_file(path)?
            .ok_or_else(|| anyhow::anyhow!("Config file not found: {}", path.display()))
    }

    /// Load and apply environment overrides.
    pub fn load_with_env(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `STOCKCHECK_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Some(db) = env_override(ENV_DB_PATH) {
            self.source.db_path = PathBuf::from(db);
        }
        if let Some(level) = env_override(ENV_LOG_LEVEL) {
            self.observability.log_level = level;
        }
    }
}

impl Validate for StockcheckConfig {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.observability.validate() {
            errors.push(e);
        }
        if let Err(e) = self.source.validate() {
            errors.push(e);
        }
        if let Err(e) = self.evaluation.validate() {
            errors.push(e);
        }

        collect_errors(errors)
    }
}

// ============================================================================
// Source Configuration
// ============================================================================

/// Where instrument data is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// SQLite database with one table per instrument
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    config_dir().join("stocks.db")
}

impl Validate for SourceConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingField {
                field: "source.db_path".into(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Evaluation Configuration
// ============================================================================

/// How many periods are scored per instrument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Score the full history once.
    Single,
    /// Score the history as of the latest year, the year before and the year
    /// before that, and combine the three scores.
    #[default]
    ThreeYear,
}

impl WindowMode {
    /// Number of latest years excluded for each scored period, oldest first.
    pub fn exclusions(self) -> &'static [usize] {
        match self {
            Self::Single => &[0],
            Self::ThreeYear => &[2, 1, 0],
        }
    }
}

impl std::fmt::Display for WindowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::ThreeYear => write!(f, "three_year"),
        }
    }
}

/// Evaluation pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    #[serde(default)]
    pub mode: WindowMode,

    #[serde(default)]
    pub policy: ScoringPolicy,

    /// Minimum years of history in three-year mode
    #[serde(default = "default_min_years_three_year")]
    pub min_years_three_year: usize,

    /// Minimum years of history in single mode
    #[serde(default = "default_min_years_single")]
    pub min_years_single: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            mode: WindowMode::default(),
            policy: ScoringPolicy::default(),
            min_years_three_year: default_min_years_three_year(),
            min_years_single: default_min_years_single(),
        }
    }
}

fn default_min_years_three_year() -> usize {
    8
}

fn default_min_years_single() -> usize {
    6
}

impl EvaluationConfig {
    /// Minimum history length for the configured mode.
    pub fn min_years(&self) -> usize {
        match self.mode {
            WindowMode::Single => self.min_years_single,
            WindowMode::ThreeYear => self.min_years_three_year,
        }
    }
}

impl Validate for EvaluationConfig {
    fn validate(&self) -> ValidationResult<()> {
        let RatingBands { top, middle } = self.policy.bands();
        if !(top.is_finite() && middle.is_finite()) || middle > top {
            return Err(ValidationError::InvalidValue {
                field: "evaluation.policy.bands".into(),
                reason: format!("middle ({}) must not exceed top ({})", middle, top),
            });
        }

        // The top band must be reachable with the periods this mode scores.
        let periods = self.mode.exclusions().len();
        let reachable = self.policy.max_score(periods);
        let applied = self.policy.bands_for(periods);
        if applied.top > reachable {
            return Err(ValidationError::InvalidValue {
                field: "evaluation.policy.bands".into(),
                reason: format!(
                    "top ({}) is out of reach, {} mode scores at most {} {}",
                    applied.top,
                    self.mode,
                    reachable,
                    self.policy.unit()
                ),
            });
        }

        // Growth needs six years; the oldest three-year period drops two more.
        let required = match self.mode {
            WindowMode::Single => crate::metrics::growth::MIN_GROWTH_YEARS,
            WindowMode::ThreeYear => crate::metrics::growth::MIN_GROWTH_YEARS + 2,
        };
        if self.min_years() < required {
            return Err(ValidationError::InvalidValue {
                field: "evaluation.min_years".into(),
                reason: format!(
                    "{} mode needs at least {} years, configured {}",
                    self.mode,
                    required,
                    self.min_years()
                ),
            });
        }

        Ok(())
    }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: ReportFormat,

    /// Write the report to this file instead of stdout
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: None,
        }
    }
}

fn default_format() -> ReportFormat {
    ReportFormat::Markdown
}

// ============================================================================
// Tests
// ============================================================================

//! Report generation for rating runs.
//!
//! Generates reports in two formats:
//! - Markdown (for people)
//! - JSON (for programmatic use)

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::instrument::Instrument;
use crate::run::RatingRun;

// ============================================================================
// Report Format
// ============================================================================

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Markdown format (human-readable)
    Markdown,
    /// JSON format (machine-readable)
    Json,
}

impl ReportFormat {
    /// File extension used when saving.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

// ============================================================================
// Rating Report
// ============================================================================

/// Report generator for rating runs.
pub struct RatingReport {
    run: RatingRun,
}

impl RatingReport {
    pub fn new(run: RatingRun) -> Self {
        Self { run }
    }

    pub fn run(&self) -> &RatingRun {
        &self.run
    }

    /// Generate report in the specified format.
    pub fn generate(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Markdown => self.to_markdown(),
            ReportFormat::Json => self.to_json(),
        }
    }

    /// Save report to file, adding the format's extension if the path has none.
    pub fn save_to_file(&self, path: &Path, format: ReportFormat) -> Result<PathBuf> {
        let content = self.generate(format);

        let file_path = if path.extension().is_none() {
            path.with_extension(format.extension())
        } else {
            path.to_path_buf()
        };

        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create report directory")?;
        }

        std::fs::write(&file_path, content)
            .with_context(|| format!("Failed to write report file {}", file_path.display()))?;

        Ok(file_path)
    }

    /// Generate markdown report.
    pub fn to_markdown(&self) -> String {
        let run = &self.run;
        let mut md = String::new();

        md.push_str(&format!(
            "# Stockcheck Rating Report\n\n**Run ID**: {}\n**Time**: {}\n**Duration**: {:.1}s\n\n",
            run.id,
            run.completed_at.format("%Y-%m-%d %H:%M:%S"),
            run.duration_secs
        ));

        md.push_str("## Summary\n\n");
        md.push_str(&format!("- **Source**: {}\n", run.source));
        md.push_str(&format!("- **Policy**: {}\n", run.policy));
        md.push_str(&format!("- **Instruments**: {}\n", run.total));
        md.push_str(&format!("- **Rated**: {}\n", run.rated));
        md.push_str(&format!("- **Skipped**: {}\n\n", run.skipped));

        md.push_str("## Ranking\n\n");
        if run.instruments.is_empty() {
            md.push_str("No instruments found.\n\n");
        } else {
            md.push_str(&format!(
                "| # | Name | Rating | Score ({}) | Correlation | EPS growth 3y | Div growth 5y | Payout | Years div not cut | Remarks |\n",
                run.unit
            ));
            md.push_str("|---|------|--------|-----------|-------------|---------------|---------------|--------|-------------------|---------|\n");
            for (rank, instrument) in run.instruments.iter().enumerate() {
                md.push_str(&markdown_row(rank + 1, instrument));
            }
            md.push('\n');
        }

        md.push_str("---\n\n");
        md.push_str(&format!(
            "*Report generated {} UTC*\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        ));

        md
    }

    /// Generate JSON report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.run).unwrap_or_else(|_| "{}".to_string())
    }
}

fn markdown_row(rank: usize, instrument: &Instrument) -> String {
    let metrics = &instrument.metrics;
    let rating = if instrument.is_rated() {
        format!("{} ({})", instrument.rating, instrument.recommendation())
    } else {
        instrument.status.to_string()
    };

    format!(
        "| {} | {} | {} | {:.1} | {} | {} | {} | {} | {} | {} |\n",
        rank,
        escape_cell(&instrument.name),
        rating,
        instrument.score,
        format_value(metrics.earning_correlation, ""),
        format_value(metrics.earning_growth_three_years, "%"),
        format_value(metrics.dividend_growth_five_years, "%"),
        format_value(metrics.payout_ratio, "%"),
        metrics
            .years_dividend_not_reduced
            .map_or_else(|| "-".to_string(), |n| n.to_string()),
        escape_cell(&instrument.remarks.join("; ")),
    )
}

fn format_value(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, suffix),
        None => "-".to_string(),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::{EvaluationStatus, Rating};

    fn sample_run() -> RatingRun {
        let mut acme = Instrument::new("ACME");
        acme.status = EvaluationStatus::Rated;
        acme.rating = Rating::A;
        acme.score = 15.0;
        acme.metrics.earning_correlation = Some(0.98);
        acme.metrics.payout_ratio = Some(42.5);
        acme.metrics.years_dividend_not_reduced = Some(9);

        let mut short = Instrument::new("SHORT|CO");
        short.status = EvaluationStatus::Skipped;
        short.add_remark("No evaluation: insufficient data (3 years, 8 required)");

        let now = Utc::now();
        RatingRun {
            id: "run-1".to_string(),
            source: "static".to_string(),
            policy: "discrete_points".to_string(),
            unit: "pts".to_string(),
            instruments: vec![acme, short],
            total: 2,
            rated: 1,
            skipped: 1,
            started_at: now,
            completed_at: now,
            duration_secs: 0.0,
        }
    }

    #[test]
    fn test_report_format_parse() {
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("pdf".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_markdown_report() {
        let md = RatingReport::new(sample_run()).to_markdown();

        assert!(md.contains("**Run ID**: run-1"));
        assert!(md.contains("Score (pts)"));
        assert!(md.contains("| 1 | ACME | A (buy) | 15.0 | 0.98 | - | - | 42.50% | 9 |  |"));
        assert!(md.contains("| 2 | SHORT\\|CO | skipped | 0.0 |"));
        assert!(md.contains("insufficient data (3 years, 8 required)"));
    }

    #[test]
    fn test_markdown_report_empty() {
        let mut run = sample_run();
        run.instruments.clear();
        let md = RatingReport::new(run).to_markdown();
        assert!(md.contains("No instruments found."));
    }

    #[test]
    fn test_json_report() {
        let json = RatingReport::new(sample_run()).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["id"], "run-1");
        assert_eq!(value["instruments"][0]["name"], "ACME");
        assert_eq!(value["instruments"][0]["rating"], "A");
        assert_eq!(value["instruments"][1]["status"], "skipped");
        assert!(value["instruments"][1]["metrics"]["payout_ratio"].is_null());
    }

    #[test]
    fn test_save_adds_extension() {
        let dir = tempfile::tempdir().unwrap();
        let report = RatingReport::new(sample_run());

        let path = report
            .save_to_file(&dir.path().join("reports/latest"), ReportFormat::Json)
            .unwrap();

        assert_eq!(path.extension().unwrap(), "json");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"ACME\""));
    }

    #[test]
    fn test_save_keeps_explicit_extension() {
        let dir = tempfile::tempdir().unwrap();
        let report = RatingReport::new(sample_run());

        let path = report
            .save_to_file(&dir.path().join("out.txt"), ReportFormat::Markdown)
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "out.txt");
    }
}

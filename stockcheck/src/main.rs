//! Stockcheck CLI.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use stockcheck::{
    RatingReport, ReportFormat, ScoringPolicy, SqliteProvider, StockCheck, StockcheckConfig,
    WindowMode,
};
use stockcheck_common::logging::init_logging_with_exclusions;
use stockcheck_common::Validate;

/// Rate and rank dividend stocks from their earnings and dividend history.
#[derive(Parser, Debug)]
#[command(name = "stockcheck")]
#[command(version)]
#[command(about = "Rate and rank dividend stocks from their earnings and dividend history.", long_about = None)]
struct Cli {
    /// Config file (default: ~/.stockcheck/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database with one table per instrument
    #[arg(long)]
    db: Option<PathBuf>,

    /// Report format (markdown, json)
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Scoring policy (points, percentage)
    #[arg(short, long)]
    policy: Option<ScoringPolicy>,

    /// Score the full history once instead of three periods
    #[arg(long)]
    single_window: bool,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn apply(self, config: &mut StockcheckConfig) {
        if let Some(db) = self.db {
            config.source.db_path = db;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(policy) = self.policy {
            config.evaluation.policy = policy;
        }
        if self.single_window {
            config.evaluation.mode = WindowMode::Single;
        }
        if let Some(output) = self.output {
            config.output.path = Some(output);
        }
    }
}

fn main() {
    if let Err(e) = run() {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<stockcheck_common::Error>()
            .map_or(1, stockcheck_common::Error::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = StockcheckConfig::load_with_env(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply(&mut config);

    config
        .validate()
        .map_err(|e| stockcheck_common::Error::Config(e.to_string()))?;

    init_logging_with_exclusions(
        &config.observability.log_level,
        &config.observability.log_format,
        &config.observability.excluded_targets,
    );

    let provider = SqliteProvider::new(&config.source.db_path);
    let run = StockCheck::new(provider, config.evaluation.clone()).run()?;
    let report = RatingReport::new(run);

    match &config.output.path {
        Some(path) => {
            let written = report.save_to_file(path, config.output.format)?;
            info!(path = %written.display(), "Report saved");
        }
        None => print!("{}", report.generate(config.output.format)),
    }

    Ok(())
}

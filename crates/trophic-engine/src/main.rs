//! Batch binary for the Trophic solver.
//!
//! Loads the configuration and the species file, evaluates every ecosystem
//! and writes the batch report as JSON.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `TROPHIC_CONFIG` or `trophic-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Load species rows from `input.species_path`
//! 4. Build and evaluate every ecosystem
//! 5. Write the report to `output.report_path`, or stdout

mod error;
mod input;

use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;
use trophic_core::config::{LoggingConfig, OutputConfig, SolverConfig};
use trophic_core::runner::{self, BatchSummary};
use trophic_types::BatchReport;

use crate::error::EngineError;

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if the configuration or species file cannot be loaded,
/// or the report cannot be written. Invalid ecosystems are not errors; they
/// appear as rejected entries in the report.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so report where it came
    //    from once it is.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    let source = source.map_or_else(|| "defaults".to_owned(), |p| p.display().to_string());
    info!(
        config = %source,
        priority = %config.evaluation.priority,
        max_consumers = config.evaluation.max_consumers,
        parallel = config.evaluation.parallel,
        "trophic-engine starting"
    );

    // 3. Load species rows.
    let rows = input::load_rows(&config.input.species_path)?;

    // 4. Evaluate.
    let report = runner::run_batch(&rows, &config.evaluation);

    // 5. Write the report.
    write_report(&report, &config.output)?;

    let summary = BatchSummary::of(&report);
    info!(
        run_id = %report.run_id,
        evaluated = summary.evaluated,
        rejected = summary.rejected,
        "trophic-engine finished"
    );
    Ok(())
}

/// Load the solver configuration.
///
/// `TROPHIC_CONFIG` names the file explicitly and must exist. Otherwise
/// `trophic-config.yaml` in the working directory is used if present, and
/// defaults if not.
fn load_config() -> Result<(SolverConfig, Option<PathBuf>), EngineError> {
    if let Ok(path) = std::env::var("TROPHIC_CONFIG") {
        let path = PathBuf::from(path);
        let config = SolverConfig::from_file(&path)?;
        return Ok((config, Some(path)));
    }

    let config_path = Path::new("trophic-config.yaml");
    if config_path.exists() {
        let config = SolverConfig::from_file(config_path)?;
        Ok((config, Some(config_path.to_path_buf())))
    } else {
        let mut config = SolverConfig::default();
        config.apply_env_overrides();
        Ok((config, None))
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Serialize the report as pretty JSON to the configured path or stdout.
fn write_report(report: &BatchReport, output: &OutputConfig) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|source| EngineError::SerializeReport { source })?;
    match &output.report_path {
        Some(path) => {
            std::fs::write(path, json).map_err(|source| EngineError::WriteReport { source })?;
            info!(path = %path.display(), "Report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").map_err(|source| EngineError::WriteReport { source })?;
        }
    }
    Ok(())
}

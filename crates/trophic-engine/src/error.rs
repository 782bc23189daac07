//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes between loading the configuration and writing the report.

use std::path::PathBuf;

/// Top-level error for the engine binary.
///
/// Only failures that stop the whole batch live here. Problems inside a
/// single ecosystem are reported in the batch report instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: trophic_core::config::ConfigError,
    },

    /// The species file could not be read.
    #[error("failed to read species file {}: {source}", path.display())]
    ReadInput {
        /// The species file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The species file extension is not one we can parse.
    #[error("unsupported species file {}: expected .json, .yaml or .yml", path.display())]
    UnsupportedInput {
        /// The species file.
        path: PathBuf,
    },

    /// The species file is not a valid JSON list of rows.
    #[error("failed to parse species JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The species file is not a valid YAML list of rows.
    #[error("failed to parse species YAML: {source}")]
    Yaml {
        /// The underlying YAML error.
        #[from]
        source: serde_yml::Error,
    },

    /// The report could not be serialized.
    #[error("failed to serialize report: {source}")]
    SerializeReport {
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The report could not be written.
    #[error("failed to write report: {source}")]
    WriteReport {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

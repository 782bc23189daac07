//! Configuration loading and typed config structures for the Trophic solver.
//!
//! The configuration lives in `trophic-config.yaml`. Every section and field
//! has a default, so an empty file (or no file at all) is a valid
//! configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::priority::PriorityKind;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level solver configuration.
///
/// Mirrors the structure of `trophic-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SolverConfig {
    /// How candidates are enumerated and simulated.
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Where species rows are read from.
    #[serde(default)]
    pub input: InputConfig,

    /// Where the batch report is written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SolverConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for file locations:
    /// - `TROPHIC_SPECIES` overrides `input.species_path`
    /// - `TROPHIC_REPORT` overrides `output.report_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override file locations from environment variables, if set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("TROPHIC_SPECIES") {
            self.input.species_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("TROPHIC_REPORT") {
            self.output.report_path = Some(PathBuf::from(path));
        }
    }
}

/// Candidate evaluation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EvaluationConfig {
    /// Order in which pending consumers are fed.
    #[serde(default)]
    pub priority: PriorityKind,

    /// Consumer count above which an ecosystem is refused (cost is `2^n`).
    #[serde(default = "default_max_consumers")]
    pub max_consumers: usize,

    /// Only simulate candidates with exactly this many consumers.
    #[serde(default)]
    pub subset_size: Option<usize>,

    /// Stop an ecosystem after this many sustainable candidates.
    #[serde(default)]
    pub result_cap: Option<usize>,

    /// Evaluate candidates on a rayon pool (needs the `parallel` feature).
    #[serde(default)]
    pub parallel: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            priority: PriorityKind::default(),
            max_consumers: default_max_consumers(),
            subset_size: None,
            result_cap: None,
            parallel: false,
        }
    }
}

/// Species input settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputConfig {
    /// Path to a `.json`, `.yaml` or `.yml` list of species rows.
    #[serde(default = "default_species_path")]
    pub species_path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            species_path: default_species_path(),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Where to write the JSON report. Stdout when unset.
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_max_consumers() -> usize {
    20
}

fn default_species_path() -> PathBuf {
    PathBuf::from("species.yaml")
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SolverConfig::default();
        assert_eq!(config.evaluation.priority, PriorityKind::DescendingNeed);
        assert_eq!(config.evaluation.max_consumers, 20);
        assert_eq!(config.evaluation.subset_size, None);
        assert!(!config.evaluation.parallel);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
evaluation:
  priority: richest_first
  max_consumers: 12
  subset_size: 5
  result_cap: 100
  parallel: true

input:
  species_path: "data/species.json"

output:
  report_path: "out/report.json"

logging:
  level: "debug"
  json: true
"#;

        let config = SolverConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.evaluation.priority, PriorityKind::RichestFirst);
        assert_eq!(config.evaluation.max_consumers, 12);
        assert_eq!(config.evaluation.subset_size, Some(5));
        assert_eq!(config.evaluation.result_cap, Some(100));
        assert!(config.evaluation.parallel);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "evaluation:\n  priority: row_order\n";
        let config = SolverConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        // Priority is overridden
        assert_eq!(config.evaluation.priority, PriorityKind::RowOrder);
        // Everything else uses defaults
        assert_eq!(config.evaluation.max_consumers, 20);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_empty_yaml() {
        let config = SolverConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let yaml = "evaluation:\n  priority: loudest_first\n";
        assert!(matches!(
            SolverConfig::parse(yaml),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = SolverConfig::from_file(Path::new("/nonexistent/trophic-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}

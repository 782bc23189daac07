//! Species file loading.
//!
//! The species file is a list of rows in JSON or YAML, chosen by file
//! extension. Rows are returned in file order; the builder relies on it.

use std::path::Path;

use tracing::info;
use trophic_types::SpeciesRow;

use crate::error::EngineError;

/// Serialization format of a species file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A JSON array of rows.
    Json,
    /// A YAML sequence of rows.
    Yaml,
}

impl InputFormat {
    /// Pick the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Read and parse the species file at `path`.
pub fn load_rows(path: &Path) -> Result<Vec<SpeciesRow>, EngineError> {
    let format = InputFormat::from_path(path).ok_or_else(|| EngineError::UnsupportedInput {
        path: path.to_path_buf(),
    })?;
    let contents = std::fs::read_to_string(path).map_err(|source| EngineError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_rows(&contents, format)?;
    info!(path = %path.display(), rows = rows.len(), "Species rows loaded");
    Ok(rows)
}

/// Parse species rows from file contents.
pub fn parse_rows(contents: &str, format: InputFormat) -> Result<Vec<SpeciesRow>, EngineError> {
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    let rows = match format {
        InputFormat::Json => serde_json::from_str(contents)?,
        InputFormat::Yaml => serde_yml::from_str(contents)?,
    };
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.json")), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_path(Path::new("a.YML")), Some(InputFormat::Yaml));
        assert_eq!(InputFormat::from_path(Path::new("dir/a.yaml")), Some(InputFormat::Yaml));
        assert_eq!(InputFormat::from_path(Path::new("a.csv")), None);
        assert_eq!(InputFormat::from_path(Path::new("species")), None);
    }

    #[test]
    fn parse_yaml_rows_in_order() {
        let yaml = r#"
- ecosystem_id: E1
  species_name: P1
  kind: Producer
  calories_provided: 10
- Ecosystem: E1
  Species: A
  Type: Animal
  CaloriesNeeded: 6
  FoodSources: "P1"
"#;
        let rows = parse_rows(yaml, InputFormat::Yaml);
        assert!(rows.is_ok(), "{rows:?}");
        let Ok(rows) = rows else { return };
        let names: Vec<&str> = rows.iter().map(|r| r.species_name.as_str()).collect();
        assert_eq!(names, vec!["P1", "A"]);
        assert!(rows.get(1).is_some_and(|r| r.calories_needed == dec!(6)
            && r.food_sources.len() == 1));
    }

    #[test]
    fn parse_json_rows() {
        let json = r#"[
            {"ecosystem_id": "E1", "species_name": "P1", "kind": "Producer",
             "calories_provided": 10, "calories_needed": 0, "food_sources": []}
        ]"#;
        let rows = parse_rows(json, InputFormat::Json);
        assert!(rows.is_ok_and(|r| r.len() == 1));
    }

    #[test]
    fn empty_file_has_no_rows() {
        assert!(parse_rows("  \n", InputFormat::Yaml).is_ok_and(|r| r.is_empty()));
        assert!(parse_rows("", InputFormat::Json).is_ok_and(|r| r.is_empty()));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            parse_rows("{not json", InputFormat::Json),
            Err(EngineError::Json { .. })
        ));
    }

    #[test]
    fn unsupported_extension_is_refused_before_reading() {
        assert!(matches!(
            load_rows(Path::new("/nonexistent/species.csv")),
            Err(EngineError::UnsupportedInput { .. })
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        assert!(matches!(
            load_rows(Path::new("/nonexistent/species.yaml")),
            Err(EngineError::ReadInput { .. })
        ));
    }
}

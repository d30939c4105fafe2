//! Persisted run configuration
//!
//! A small JSON file holding the directory pair and chosen format, read at
//! startup and written only on explicit save. The engine's options record
//! mirrors this shape.

use crate::error::{ExportError, ExportResult};
use crate::types::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "tableport.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input_dir: String,
    #[serde(default)]
    pub output_dir: String,
    #[serde(default)]
    pub format: OutputFormat,
}

impl AppConfig {
    /// Load the saved configuration; a missing file yields defaults.
    pub fn load(path: &Path) -> ExportResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ExportError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save(&self, path: &Path) -> ExportResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);

        let config = AppConfig {
            input_dir: "tables".to_string(),
            output_dir: "out".to_string(),
            format: OutputFormat::Json,
        };
        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }
}

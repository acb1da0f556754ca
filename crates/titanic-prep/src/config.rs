//! Configuration types for the preprocessing pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! Defaults reproduce the fixed Titanic run: read `TitanicDataset.csv`,
//! drop `Cabin`, filter outliers on `Age` then `Fare`, write
//! `titanic_preprocessed.csv`.

use crate::error::{PreprocessingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default input file name.
pub const DEFAULT_INPUT_PATH: &str = "TitanicDataset.csv";

/// Default output file name.
pub const DEFAULT_OUTPUT_PATH: &str = "titanic_preprocessed.csv";

/// Columns dropped before any other transform.
pub const DEFAULT_DROP_COLUMNS: [&str; 1] = ["Cabin"];

/// Columns checked for outliers, in processing order.
pub const DEFAULT_OUTLIER_COLUMNS: [&str; 2] = ["Age", "Fare"];

/// Configuration for the preprocessing pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use titanic_prep::config::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .input_path("data/train.csv")
///     .remove_outliers(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// CSV file to read.
    /// Default: "TitanicDataset.csv"
    pub input_path: PathBuf,

    /// CSV file to write the transformed table to.
    /// Default: "titanic_preprocessed.csv"
    pub output_path: PathBuf,

    /// Whether to run the IQR outlier filter.
    /// Default: true
    pub remove_outliers: bool,

    /// Columns removed before imputation (skipped when absent).
    /// Default: ["Cabin"]
    pub drop_columns: Vec<String>,

    /// Columns filtered for outliers. Order matters: each column is checked
    /// against the rows that survived the previous ones.
    /// Default: ["Age", "Fare"]
    pub outlier_columns: Vec<String>,

    /// Whether dataset reports are printed to stdout as they are produced.
    /// Default: true
    pub print_reports: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            remove_outliers: true,
            drop_columns: DEFAULT_DROP_COLUMNS.iter().map(|s| s.to_string()).collect(),
            outlier_columns: DEFAULT_OUTLIER_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            print_reports: true,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PreprocessingError::Io(e).with_context(format!("Reading config {}", path.display()))
        })?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| PreprocessingError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_path"));
        }
        if self.input_path == self.output_path {
            return Err(ConfigValidationError::OutputOverwritesInput(
                self.output_path.clone(),
            ));
        }

        let mut seen = HashSet::new();
        for col in &self.outlier_columns {
            if col.is_empty() {
                return Err(ConfigValidationError::EmptyColumnName("outlier_columns"));
            }
            if !seen.insert(col.as_str()) {
                return Err(ConfigValidationError::DuplicateOutlierColumn(col.clone()));
            }
        }
        if self.drop_columns.iter().any(|c| c.is_empty()) {
            return Err(ConfigValidationError::EmptyColumnName("drop_columns"));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("'{0}' must not be empty")]
    EmptyPath(&'static str),

    #[error("Output path {} would overwrite the input", .0.display())]
    OutputOverwritesInput(PathBuf),

    #[error("'{0}' contains an empty column name")]
    EmptyColumnName(&'static str),

    #[error("Outlier column '{0}' listed more than once")]
    DuplicateOutlierColumn(String),
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    remove_outliers: Option<bool>,
    drop_columns: Option<Vec<String>>,
    outlier_columns: Option<Vec<String>>,
    print_reports: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Set the CSV file to read.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the CSV file to write.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Enable or disable IQR outlier removal.
    pub fn remove_outliers(mut self, remove: bool) -> Self {
        self.remove_outliers = Some(remove);
        self
    }

    /// Replace the set of columns dropped up front.
    pub fn drop_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drop_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the ordered list of columns checked for outliers.
    pub fn outlier_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outlier_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Enable or disable printing reports to stdout.
    pub fn print_reports(mut self, print: bool) -> Self {
        self.print_reports = Some(print);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<PipelineConfig, ConfigValidationError> {
        let defaults = PipelineConfig::default();
        let config = PipelineConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_path: self.output_path.unwrap_or(defaults.output_path),
            remove_outliers: self.remove_outliers.unwrap_or(defaults.remove_outliers),
            drop_columns: self.drop_columns.unwrap_or(defaults.drop_columns),
            outlier_columns: self.outlier_columns.unwrap_or(defaults.outlier_columns),
            print_reports: self.print_reports.unwrap_or(defaults.print_reports),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_path, PathBuf::from("TitanicDataset.csv"));
        assert_eq!(config.output_path, PathBuf::from("titanic_preprocessed.csv"));
        assert!(config.remove_outliers);
        assert_eq!(config.drop_columns, vec!["Cabin".to_string()]);
        assert_eq!(
            config.outlier_columns,
            vec!["Age".to_string(), "Fare".to_string()]
        );
        assert!(config.print_reports);
    }

    #[test]
    fn test_builder_defaults() {
        let config = PipelineConfig::builder().build().unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = PipelineConfig::builder()
            .input_path("in.csv")
            .output_path("out/result.csv")
            .remove_outliers(false)
            .drop_columns(["Cabin", "Ticket"])
            .outlier_columns(["Fare"])
            .print_reports(false)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("in.csv"));
        assert_eq!(config.output_path, PathBuf::from("out/result.csv"));
        assert!(!config.remove_outliers);
        assert_eq!(config.drop_columns.len(), 2);
        assert_eq!(config.outlier_columns, vec!["Fare".to_string()]);
        assert!(!config.print_reports);
    }

    #[test]
    fn test_validation_duplicate_outlier_column() {
        let result = PipelineConfig::builder()
            .outlier_columns(["Age", "Fare", "Age"])
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::DuplicateOutlierColumn(col) if col == "Age"
        ));
    }

    #[test]
    fn test_validation_same_input_and_output() {
        let result = PipelineConfig::builder()
            .input_path("data.csv")
            .output_path("data.csv")
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::OutputOverwritesInput(_)
        ));
    }

    #[test]
    fn test_validation_empty_input_path() {
        let result = PipelineConfig::builder().input_path("").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyPath("input_path")
        ));
    }

    #[test]
    fn test_config_from_partial_json() {
        let json = r#"{
            "input_path": "train.csv",
            "remove_outliers": false
        }"#;

        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.input_path, PathBuf::from("train.csv"));
        assert!(!config.remove_outliers);
        // Unspecified fields fall back to defaults
        assert_eq!(config.drop_columns, vec!["Cabin".to_string()]);
        assert_eq!(config.output_path, PathBuf::from("titanic_preprocessed.csv"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = PipelineConfig::builder()
            .outlier_columns(["Fare", "Age"])
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}

//! Configuration types for the campaign analysis pipeline.
//!
//! Runtime options (paths, toggles) live in [`AnalysisConfig`], built with a
//! fluent builder. The analysis itself is parameterized only by the fixed
//! constants below, which never change at runtime.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// =============================================================================
// Analysis Constants
// =============================================================================

/// Right-inclusive bucket edges for age ranges: `(0, 17], (17, 29], ...`.
pub const AGE_BIN_EDGES: [i64; 8] = [0, 17, 29, 39, 49, 59, 69, 120];

/// Labels for the buckets delimited by [`AGE_BIN_EDGES`].
pub const AGE_RANGE_LABELS: [&str; 7] = ["0-17", "18-29", "30-39", "40-49", "50-59", "60-69", "70+"];

/// Calendar order of the `month` column values.
pub const MONTH_ORDER: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Calls at or below this many seconds are not counted as conversations.
pub const MIN_CALL_DURATION_SECS: i64 = 60;

/// `pdays` value meaning the customer was never contacted before.
pub const FIRST_CONTACT_PDAYS: i64 = -1;

/// `contact` value for calls placed to a mobile phone.
pub const CELLULAR_CONTACT: &str = "cellular";

/// Columns the analysis reads. Everything else in the file is passed through.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "age", "job", "marital", "month", "contact", "pdays", "duration",
];

/// Required columns holding whole numbers.
pub const INTEGER_COLUMNS: [&str; 3] = ["age", "pdays", "duration"];

const DEFAULT_INPUT_PATH: &str = "data/bank-full.csv";
const DEFAULT_OUTPUT_DIR: &str = "data/processed";
const DEFAULT_AGE_STATS_FILE: &str = "age_stats.csv";
const DEFAULT_DURATION_REPORT_FILE: &str = "report_average_call_duration_per_job.csv";
const DEFAULT_SEPARATOR: u8 = b';';
const PLOTS_SUBDIR: &str = "plots";
const RUN_REPORT_FILE: &str = "run_report.json";

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Configuration for one analysis run.
///
/// The defaults reproduce the fixed batch job: read `data/bank-full.csv`,
/// write reports and plots under `data/processed`.
///
/// # Example
///
/// ```rust,ignore
/// use campaign_eda::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .input_path("fixtures/bank.csv")
///     .output_dir("target/eda")
///     .render_plots(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Semicolon-delimited source file.
    /// Default: "data/bank-full.csv"
    pub input_path: PathBuf,

    /// Field separator of the source file.
    /// Default: b';'
    pub separator: u8,

    /// Directory receiving every output file.
    /// Default: "data/processed"
    pub output_dir: PathBuf,

    /// File name of the age statistics CSV.
    /// Default: "age_stats.csv"
    pub age_stats_file: String,

    /// File name of the per-job call duration CSV.
    /// Default: "report_average_call_duration_per_job.csv"
    pub duration_report_file: String,

    /// File name for the seasonal variability CSV. Not written when None.
    /// Default: None
    pub seasonal_report_file: Option<String>,

    /// Whether to render the three PNG charts.
    /// Default: true
    pub render_plots: bool,

    /// Whether to write a JSON summary of the run.
    /// Default: false
    pub emit_report: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            separator: DEFAULT_SEPARATOR,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            age_stats_file: DEFAULT_AGE_STATS_FILE.to_string(),
            duration_report_file: DEFAULT_DURATION_REPORT_FILE.to_string(),
            seasonal_report_file: None,
            render_plots: true,
            emit_report: false,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if matches!(self.separator, b'\n' | b'\r' | b'"') {
            return Err(ConfigValidationError::InvalidSeparator(self.separator as char));
        }

        check_file_name("age_stats_file", &self.age_stats_file)?;
        check_file_name("duration_report_file", &self.duration_report_file)?;
        if let Some(name) = &self.seasonal_report_file {
            check_file_name("seasonal_report_file", name)?;
        }

        Ok(())
    }

    pub fn age_stats_path(&self) -> PathBuf {
        self.output_dir.join(&self.age_stats_file)
    }

    pub fn duration_report_path(&self) -> PathBuf {
        self.output_dir.join(&self.duration_report_file)
    }

    pub fn seasonal_report_path(&self) -> Option<PathBuf> {
        self.seasonal_report_file
            .as_ref()
            .map(|name| self.output_dir.join(name))
    }

    /// Directory receiving the rendered charts.
    pub fn plots_dir(&self) -> PathBuf {
        self.output_dir.join(PLOTS_SUBDIR)
    }

    pub fn run_report_path(&self) -> PathBuf {
        self.output_dir.join(RUN_REPORT_FILE)
    }
}

fn check_file_name(field: &str, name: &str) -> Result<(), ConfigValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || Path::new(trimmed).file_name().is_none() {
        return Err(ConfigValidationError::InvalidFileName {
            field: field.to_string(),
            value: name.to_string(),
        });
    }
    Ok(())
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid separator {0:?} (must not be a quote or line break)")]
    InvalidSeparator(char),

    #[error("Invalid file name for '{field}': {value:?}")]
    InvalidFileName { field: String, value: String },
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    input_path: Option<PathBuf>,
    separator: Option<u8>,
    output_dir: Option<PathBuf>,
    age_stats_file: Option<String>,
    duration_report_file: Option<String>,
    seasonal_report_file: Option<String>,
    render_plots: Option<bool>,
    emit_report: Option<bool>,
}

impl AnalysisConfigBuilder {
    /// Set the source file to analyze.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the field separator of the source file.
    pub fn separator(mut self, separator: u8) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Set the directory for reports and plots.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    pub fn age_stats_file(mut self, name: impl Into<String>) -> Self {
        self.age_stats_file = Some(name.into());
        self
    }

    pub fn duration_report_file(mut self, name: impl Into<String>) -> Self {
        self.duration_report_file = Some(name.into());
        self
    }

    /// Also write the seasonal variability table to this file.
    pub fn seasonal_report_file(mut self, name: impl Into<String>) -> Self {
        self.seasonal_report_file = Some(name.into());
        self
    }

    /// Enable or disable chart rendering.
    pub fn render_plots(mut self, render: bool) -> Self {
        self.render_plots = Some(render);
        self
    }

    /// Enable or disable the JSON run report.
    pub fn emit_report(mut self, emit: bool) -> Self {
        self.emit_report = Some(emit);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            separator: self.separator.unwrap_or(defaults.separator),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            age_stats_file: self.age_stats_file.unwrap_or(defaults.age_stats_file),
            duration_report_file: self
                .duration_report_file
                .unwrap_or(defaults.duration_report_file),
            seasonal_report_file: self.seasonal_report_file,
            render_plots: self.render_plots.unwrap_or(defaults.render_plots),
            emit_report: self.emit_report.unwrap_or(defaults.emit_report),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_paths() {
        let config = AnalysisConfig::default();
        assert_eq!(config.input_path, PathBuf::from("data/bank-full.csv"));
        assert_eq!(config.separator, b';');
        assert_eq!(
            config.age_stats_path(),
            PathBuf::from("data/processed/age_stats.csv")
        );
        assert_eq!(
            config.duration_report_path(),
            PathBuf::from("data/processed/report_average_call_duration_per_job.csv")
        );
        assert_eq!(config.plots_dir(), PathBuf::from("data/processed/plots"));
        assert!(config.seasonal_report_path().is_none());
        assert!(config.render_plots);
        assert!(!config.emit_report);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .input_path("in.csv")
            .output_dir("out")
            .separator(b',')
            .seasonal_report_file("seasonal.csv")
            .render_plots(false)
            .emit_report(true)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("in.csv"));
        assert_eq!(config.separator, b',');
        assert_eq!(
            config.seasonal_report_path(),
            Some(PathBuf::from("out/seasonal.csv"))
        );
        assert_eq!(config.run_report_path(), PathBuf::from("out/run_report.json"));
        assert!(!config.render_plots);
        assert!(config.emit_report);
    }

    #[test]
    fn test_validation_invalid_separator() {
        let result = AnalysisConfig::builder().separator(b'"').build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidSeparator('"')
        ));
    }

    #[test]
    fn test_validation_empty_file_name() {
        let result = AnalysisConfig::builder().age_stats_file("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidFileName { .. }
        ));
    }

    #[test]
    fn test_age_bins_match_labels() {
        assert_eq!(AGE_BIN_EDGES.len(), AGE_RANGE_LABELS.len() + 1);
        assert!(AGE_BIN_EDGES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "input_path": "raw/bank.csv",
            "separator": 59,
            "output_dir": "reports",
            "age_stats_file": "ages.csv",
            "duration_report_file": "durations.csv",
            "seasonal_report_file": null,
            "render_plots": false,
            "emit_report": true
        }"#;

        let config: AnalysisConfig = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(config.age_stats_path(), PathBuf::from("reports/ages.csv"));
        assert_eq!(config.separator, b';');
        assert!(!config.render_plots);
        assert!(config.validate().is_ok());
    }
}

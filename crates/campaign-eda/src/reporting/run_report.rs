use crate::error::{ComputationWarning, Result};
use crate::types::{AgeRange, AgeStats, AnalysisResult, JobDurationStats, SeasonalStdRow};
use crate::utils::ensure_parent_dir;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// JSON summary of one pipeline run.
///
/// Used for both `--json` output on stdout and the `--emit-report` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Row counts through the cleaning stage
    pub rows: StageRowCounts,
    pub age_stats: AgeStats,
    pub age_range_counts: Vec<(AgeRange, usize)>,
    pub job_durations: Vec<JobDurationStats>,
    pub seasonal_std: Vec<SeasonalStdRow>,
    pub warnings: Vec<ComputationWarning>,
    /// Files written by the run
    pub outputs: Vec<String>,
    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

/// Row counts before and after cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRowCounts {
    pub loaded: usize,
    pub columns: usize,
    pub duplicates_removed: usize,
    pub null_rows_removed: usize,
    pub after_cleaning: usize,
    /// Rows whose age falls outside every bucket
    pub unbucketed_ages: usize,
}

impl RunReport {
    /// Build the report from a finished run.
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: result.input_file.display().to_string(),
            rows: StageRowCounts {
                loaded: result.cleaning.rows_before,
                columns: result.columns,
                duplicates_removed: result.cleaning.duplicates_removed,
                null_rows_removed: result.cleaning.null_rows_removed,
                after_cleaning: result.cleaning.rows_after,
                unbucketed_ages: result.unbucketed_ages,
            },
            age_stats: result.age_stats.clone(),
            age_range_counts: result.age_range_counts.clone(),
            job_durations: result.job_durations.clone(),
            seasonal_std: result.seasonal_std.clone(),
            warnings: result.warnings.clone(),
            outputs: result
                .outputs
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
            duration_ms: result.duration_ms,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Run report saved: {}", path.display());
        Ok(())
    }
}

//! Call duration statistics per occupation.
//!
//! Calls of one minute or less are treated as noise and excluded. The
//! remaining durations are grouped by `job`; the CSV report renders each
//! statistic as a `"Xm Ys"` string.

use crate::config::MIN_CALL_DURATION_SECS;
use crate::error::{ComputationWarning, Result, ResultExt};
use crate::reporting::write_csv;
use crate::stats;
use crate::types::{CallRecord, JobDurationStats};
use crate::utils::{group_values, seconds_to_minutes};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

/// Columns of the formatted report, in output order.
pub const REPORT_COLUMNS: [&str; 6] = [
    "job",
    "min_minutes",
    "max_minutes",
    "std_minutes",
    "mean_minutes",
    "median_minutes",
];

const STAGE: &str = "call_duration";

pub struct CallDurationReporter;

impl CallDurationReporter {
    /// Compute per-job duration statistics and write the formatted report.
    ///
    /// Returns the unformatted statistics, ordered by job name.
    pub fn report(
        records: &[CallRecord],
        output: &Path,
        warnings: &mut Vec<ComputationWarning>,
    ) -> Result<Vec<JobDurationStats>> {
        info!("Computing call duration statistics per job...");

        let stats = Self::job_duration_stats(records, warnings);

        let mut frame = Self::format_report(&stats)?;
        write_csv(&mut frame, output)
            .context(format!("Writing duration report to '{}'", output.display()))?;
        info!("Duration report saved: {}", output.display());

        Ok(stats)
    }

    /// Group calls longer than [`MIN_CALL_DURATION_SECS`] by job and summarize them.
    ///
    /// A job with a single qualifying call has an undefined standard
    /// deviation; it is kept as `None` and reported as a warning.
    pub fn job_duration_stats(
        records: &[CallRecord],
        warnings: &mut Vec<ComputationWarning>,
    ) -> Vec<JobDurationStats> {
        let kept: Vec<&CallRecord> = records
            .iter()
            .filter(|record| record.duration > MIN_CALL_DURATION_SECS)
            .collect();
        debug!(
            "Kept {} of {} calls longer than {}s",
            kept.len(),
            records.len(),
            MIN_CALL_DURATION_SECS
        );

        let groups = group_values(
            kept.iter()
                .map(|record| (record.job.as_str(), record.duration as f64)),
        );

        let mut result = Vec::with_capacity(groups.len());
        for (job, durations) in groups {
            let Some(summary) = stats::summarize(&durations) else {
                continue;
            };

            if summary.std.is_none() {
                let warning = ComputationWarning::new(
                    STAGE,
                    job,
                    "standard deviation undefined for a single call; formatted as 0m 0s",
                );
                warn!("{}", warning);
                warnings.push(warning);
            }

            result.push(JobDurationStats {
                job: job.to_string(),
                count: summary.count,
                mean: summary.mean,
                median: summary.median,
                min: summary.min as i64,
                max: summary.max as i64,
                std: summary.std,
            });
        }

        result
    }

    /// Render the statistics as the `"Xm Ys"` report table.
    ///
    /// Min and max are whole seconds already; std is rounded half to even;
    /// mean and median are truncated.
    pub fn format_report(stats: &[JobDurationStats]) -> Result<DataFrame> {
        let jobs: Vec<&str> = stats.iter().map(|s| s.job.as_str()).collect();
        let min: Vec<String> = stats.iter().map(|s| seconds_to_minutes(s.min)).collect();
        let max: Vec<String> = stats.iter().map(|s| seconds_to_minutes(s.max)).collect();
        let std: Vec<String> = stats
            .iter()
            .map(|s| seconds_to_minutes(rounded_std(s.std)))
            .collect();
        let mean: Vec<String> = stats
            .iter()
            .map(|s| seconds_to_minutes(s.mean.trunc() as i64))
            .collect();
        let median: Vec<String> = stats
            .iter()
            .map(|s| seconds_to_minutes(s.median.trunc() as i64))
            .collect();

        let frame = DataFrame::new(vec![
            Column::new(REPORT_COLUMNS[0].into(), jobs),
            Column::new(REPORT_COLUMNS[1].into(), min),
            Column::new(REPORT_COLUMNS[2].into(), max),
            Column::new(REPORT_COLUMNS[3].into(), std),
            Column::new(REPORT_COLUMNS[4].into(), mean),
            Column::new(REPORT_COLUMNS[5].into(), median),
        ])?;

        Ok(frame)
    }
}

/// Whole seconds of a standard deviation; undefined counts as zero.
fn rounded_std(std: Option<f64>) -> i64 {
    std.map(|value| value.round_ties_even() as i64).unwrap_or(0)
}

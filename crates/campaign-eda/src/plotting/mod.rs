//! Chart rendering.
//!
//! Three PNG charts are written into the plots directory:
//!
//! - `age_range_histogram.png`: customers per age bucket
//! - `mean_duration_per_job.png`: mean call duration per job
//! - `seasonal_duration_std_heatmap.png`: duration spread by month and marital status
//!
//! A chart with nothing to draw is skipped with a warning instead of failing
//! the run.

pub mod data;
mod render;

pub use data::{age_range_counts, mean_duration_bars, HeatmapMatrix};
pub use render::{render_age_histogram, render_mean_duration_bars, render_seasonal_heatmap};

use crate::error::{ComputationWarning, Result, ResultExt};
use crate::types::{AgeRange, JobDurationStats, SeasonalStdRow};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const AGE_HISTOGRAM_FILE: &str = "age_range_histogram.png";
pub const DURATION_BARS_FILE: &str = "mean_duration_per_job.png";
pub const SEASONAL_HEATMAP_FILE: &str = "seasonal_duration_std_heatmap.png";

const STAGE: &str = "plotting";

/// Renders every chart of a run into one directory.
#[derive(Debug, Clone)]
pub struct Plotter {
    plots_dir: PathBuf,
}

impl Plotter {
    pub fn new(plots_dir: impl Into<PathBuf>) -> Self {
        Self {
            plots_dir: plots_dir.into(),
        }
    }

    pub fn plots_dir(&self) -> &Path {
        &self.plots_dir
    }

    /// Render all charts and return the paths written, in render order.
    pub fn render_all(
        &self,
        age_counts: &[(AgeRange, usize)],
        job_durations: &[JobDurationStats],
        seasonal: &[SeasonalStdRow],
        warnings: &mut Vec<ComputationWarning>,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.plots_dir).context(format!(
            "Creating plots directory '{}'",
            self.plots_dir.display()
        ))?;

        let mut written = Vec::with_capacity(3);

        let path = self.plots_dir.join(AGE_HISTOGRAM_FILE);
        render_age_histogram(age_counts, &path)?;
        info!("Plot saved: {}", path.display());
        written.push(path);

        let bars = mean_duration_bars(job_durations);
        if bars.is_empty() {
            skip(warnings, DURATION_BARS_FILE, "no calls longer than one minute");
        } else {
            let path = self.plots_dir.join(DURATION_BARS_FILE);
            render_mean_duration_bars(&bars, &path)?;
            info!("Plot saved: {}", path.display());
            written.push(path);
        }

        let matrix = HeatmapMatrix::from_rows(seasonal);
        if matrix.is_empty() {
            skip(
                warnings,
                SEASONAL_HEATMAP_FILE,
                "no month and marital pair has a defined deviation",
            );
        } else {
            let path = self.plots_dir.join(SEASONAL_HEATMAP_FILE);
            render_seasonal_heatmap(&matrix, &path)?;
            info!("Plot saved: {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}

fn skip(warnings: &mut Vec<ComputationWarning>, file: &str, reason: &str) {
    let warning = ComputationWarning::new(STAGE, file, format!("skipped: {}", reason));
    warn!("{}", warning);
    warnings.push(warning);
}

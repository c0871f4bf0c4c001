//! The analysis pipeline and its builder.

use crate::analysis::{AgeProfiler, CallDurationReporter, SeasonalAnalyzer};
use crate::cleaner::DataCleaner;
use crate::config::AnalysisConfig;
use crate::error::{ComputationWarning, Result};
use crate::loader::{extract_records, load_dataset};
use crate::pipeline::progress::{
    ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate,
};
use crate::plotting::{age_range_counts, Plotter};
use crate::reporting::RunReport;
use crate::types::AnalysisResult;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Runs load, clean, the three analyses and the plots, in that order.
///
/// # Example
///
/// ```rust,ignore
/// use campaign_eda::{AnalysisConfig, Pipeline};
///
/// let config = AnalysisConfig::builder()
///     .input_path("data/bank-full.csv")
///     .seasonal_report_file("seasonal_std.csv")
///     .build()?;
///
/// let result = Pipeline::builder().config(config).build()?.run()?;
/// println!("{} rows after cleaning", result.cleaning.rows_after);
/// ```
pub struct Pipeline {
    config: AnalysisConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    cleaner: DataCleaner,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Execute every stage and return what the run produced.
    ///
    /// Output files are overwritten. Loading and schema errors stop the run
    /// before anything is written.
    pub fn run(&self) -> Result<AnalysisResult> {
        match self.run_internal() {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Analysis completed successfully"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error [{}]: {}", e.error_code(), e);
                Err(e)
            }
        }
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn enter(&self, stage: PipelineStage) {
        debug!("Stage: {}", stage.display_name());
        self.report_progress(ProgressUpdate::started(stage));
    }

    fn run_internal(&self) -> Result<AnalysisResult> {
        let start_time = Instant::now();
        let config = &self.config;
        info!("Starting analysis of {}", config.input_path.display());

        let mut warnings: Vec<ComputationWarning> = Vec::new();
        let mut outputs = Vec::new();

        self.enter(PipelineStage::Loading);
        let raw = load_dataset(&config.input_path, config.separator)?;
        let columns = raw.width();

        self.enter(PipelineStage::Cleaning);
        let (cleaned, cleaning) = self.cleaner.clean(&raw)?;
        drop(raw);
        let records = extract_records(&cleaned)?;

        self.enter(PipelineStage::AgeProfile);
        let age_stats_path = config.age_stats_path();
        let profile = AgeProfiler::profile(&cleaned, &age_stats_path, &mut warnings)?;
        outputs.push(age_stats_path);
        let (age_counts, unbucketed_ages) = age_range_counts(&profile.table)?;
        if unbucketed_ages > 0 {
            warn!("{} rows have an age outside every bucket", unbucketed_ages);
        }

        self.enter(PipelineStage::CallDuration);
        let duration_path = config.duration_report_path();
        let job_durations = CallDurationReporter::report(&records, &duration_path, &mut warnings)?;
        outputs.push(duration_path);

        self.enter(PipelineStage::SeasonalAnalysis);
        let seasonal_std = SeasonalAnalyzer::analyze(&records, &mut warnings);
        if let Some(path) = config.seasonal_report_path() {
            SeasonalAnalyzer::write_report(&seasonal_std, &path)?;
            outputs.push(path);
        }

        if config.render_plots {
            self.enter(PipelineStage::Plotting);
            let plotter = Plotter::new(config.plots_dir());
            let written =
                plotter.render_all(&age_counts, &job_durations, &seasonal_std, &mut warnings)?;
            outputs.extend(written);
        } else {
            debug!("Plot rendering disabled");
        }

        let mut result = AnalysisResult {
            input_file: config.input_path.clone(),
            columns,
            cleaning,
            age_stats: profile.stats,
            age_range_counts: age_counts,
            unbucketed_ages,
            job_durations,
            seasonal_std,
            warnings,
            outputs,
            duration_ms: 0,
        };

        if config.emit_report {
            self.enter(PipelineStage::Reporting);
            let report_path = config.run_report_path();
            result.outputs.push(report_path.clone());
            result.duration_ms = start_time.elapsed().as_millis() as u64;
            RunReport::from_result(&result).write_to_file(&report_path)?;
        }

        result.duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Analysis complete in {}ms: {} rows analyzed, {} warnings, {} files written",
            result.duration_ms,
            result.cleaning.rows_after,
            result.warnings.len(),
            result.outputs.len()
        );

        Ok(result)
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<AnalysisConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Set the run configuration. Defaults to [`AnalysisConfig::default`].
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Validate the configuration and build the pipeline.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            config,
            progress_reporter: self.progress_reporter,
            cleaner: DataCleaner,
        })
    }
}

//! Exploratory analysis of a bank telemarketing campaign.
//!
//! Built with Rust and Polars, the library loads a semicolon-delimited
//! campaign dataset and produces three analyses over it.
//!
//! # Overview
//!
//! - **Loading**: header-based CSV reading with schema validation
//! - **Cleaning**: duplicate removal followed by incomplete-row removal
//! - **Age Profile**: age buckets plus mean, median, mode, variance and range
//! - **Call Duration Report**: per-job duration statistics formatted as `"Xm Ys"`
//! - **Seasonal Analysis**: duration spread by month and marital status for
//!   first-contact cellular calls
//! - **Plots**: histogram, bar chart and heatmap written as PNG files
//! - **Run Report**: optional JSON summary of a run
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use campaign_eda::{AnalysisConfig, Pipeline};
//!
//! let config = AnalysisConfig::builder()
//!     .input_path("data/bank-full.csv")
//!     .output_dir("data/processed")
//!     .build()?;
//!
//! let result = Pipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//!
//! println!("Mode age: {}", result.age_stats.mode);
//! for warning in &result.warnings {
//!     println!("warning: {}", warning);
//! }
//! ```
//!
//! # Undefined statistics
//!
//! A sample variance or standard deviation needs at least two values. Where
//! a group has only one, the statistic is kept as `None`, a
//! [`ComputationWarning`] is recorded and the run continues.

pub mod analysis;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod plotting;
pub mod reporting;
pub mod stats;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analysis::{AgeProfile, AgeProfiler, CallDurationReporter, SeasonalAnalyzer};
pub use cleaner::DataCleaner;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{AnalysisError, ComputationWarning, Result as EdaResult, ResultExt};
pub use loader::{extract_records, load_dataset};
pub use pipeline::{
    ClosureProgressReporter, Pipeline, PipelineBuilder, PipelineStage, ProgressReporter,
    ProgressUpdate,
};
pub use plotting::Plotter;
pub use reporting::{RunReport, StageRowCounts, write_csv};
pub use types::{
    AgeRange, AgeStats, AnalysisResult, CallRecord, CleaningSummary, JobDurationStats, Month,
    SeasonalStdRow,
};
pub use utils::seconds_to_minutes;

//! Pipeline module.
//!
//! Orchestrates one analysis run and reports progress while it executes.

mod builder;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder};
pub use progress::{ClosureProgressReporter, PipelineStage, ProgressReporter, ProgressUpdate};

//! Report output: CSV tables and the JSON run report.
//!
//! The analysis stages write their CSV files through [`write_csv`]. The run
//! report summarizes a whole pipeline run and is only written on request.
//!
//! # Example
//!
//! ```rust,ignore
//! use campaign_eda::reporting::RunReport;
//!
//! let report = RunReport::from_result(&result);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! report.write_to_file(&config.run_report_path())?;
//! ```

mod run_report;
mod writer;

pub use run_report::{RunReport, StageRowCounts};
pub use writer::write_csv;

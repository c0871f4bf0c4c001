//! The three analyses run over the cleaned table.
//!
//! - [`age`]: age buckets and summary statistics of the `age` column
//! - [`duration`]: call duration statistics per occupation
//! - [`seasonal`]: spread of call durations per month and marital status
//!
//! Each analysis groups explicitly (key to list of values) and then applies
//! the functions in [`crate::stats`] per group. Statistics that are undefined
//! for a group are reported as [`ComputationWarning`]s rather than NaN.
//!
//! [`ComputationWarning`]: crate::error::ComputationWarning

pub mod age;
pub mod duration;
pub mod seasonal;

pub use age::{AgeProfile, AgeProfiler};
pub use duration::CallDurationReporter;
pub use seasonal::SeasonalAnalyzer;

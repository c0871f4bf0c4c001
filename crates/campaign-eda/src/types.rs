use crate::config::{AGE_BIN_EDGES, AGE_RANGE_LABELS, MONTH_ORDER};
use crate::error::ComputationWarning;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Typed view of one call record, restricted to the columns the analysis uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub age: i64,
    pub job: String,
    pub marital: String,
    pub month: String,
    pub contact: String,
    pub pdays: i64,
    /// Length of the last call, in seconds.
    pub duration: i64,
}

/// Fixed age bucket a customer falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "0-17")]
    Minor,
    #[serde(rename = "18-29")]
    Twenties,
    #[serde(rename = "30-39")]
    Thirties,
    #[serde(rename = "40-49")]
    Forties,
    #[serde(rename = "50-59")]
    Fifties,
    #[serde(rename = "60-69")]
    Sixties,
    #[serde(rename = "70+")]
    Seventies,
}

impl AgeRange {
    /// All buckets in ascending order.
    pub const ALL: [AgeRange; 7] = [
        Self::Minor,
        Self::Twenties,
        Self::Thirties,
        Self::Forties,
        Self::Fifties,
        Self::Sixties,
        Self::Seventies,
    ];

    /// Bucket for an age, using right-inclusive intervals over [`AGE_BIN_EDGES`].
    ///
    /// Ages at or below the first edge or above the last one have no bucket.
    pub fn from_age(age: i64) -> Option<Self> {
        AGE_BIN_EDGES
            .windows(2)
            .position(|edges| age > edges[0] && age <= edges[1])
            .map(|idx| Self::ALL[idx])
    }

    pub fn label(&self) -> &'static str {
        AGE_RANGE_LABELS[*self as usize]
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar month, ordered January to December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    /// Parse a lowercase three-letter abbreviation ("jan", "feb", ...).
    ///
    /// Matching is exact: other casings and surrounding whitespace are
    /// unknown months.
    pub fn parse(value: &str) -> Option<Self> {
        MONTH_ORDER
            .iter()
            .position(|abbrev| *abbrev == value)
            .map(|idx| Self::ALL[idx])
    }

    pub fn abbrev(&self) -> &'static str {
        MONTH_ORDER[*self as usize]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Summary statistics of the `age` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeStats {
    pub mean: f64,
    pub median: f64,
    /// Most frequent age; the smallest one when several tie.
    pub mode: i64,
    /// Sample variance; undefined for fewer than two rows.
    pub variance: Option<f64>,
    pub min: i64,
    pub max: i64,
}

/// Call duration statistics for one occupation, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDurationStats {
    pub job: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: i64,
    pub max: i64,
    /// Sample standard deviation; undefined for a single call.
    pub std: Option<f64>,
}

/// Spread of call durations for one (month, marital status) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalStdRow {
    pub month: Month,
    pub marital: String,
    pub count: usize,
    /// Sample standard deviation in seconds; undefined for a single call.
    pub std_duration: Option<f64>,
}

/// What the cleaner removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub rows_before: usize,
    pub duplicates_removed: usize,
    pub null_rows_removed: usize,
    pub rows_after: usize,
}

impl CleaningSummary {
    pub fn rows_removed(&self) -> usize {
        self.duplicates_removed + self.null_rows_removed
    }
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub input_file: PathBuf,
    pub columns: usize,
    pub cleaning: CleaningSummary,
    pub age_stats: AgeStats,
    /// Row counts per age bucket, all seven buckets in order.
    pub age_range_counts: Vec<(AgeRange, usize)>,
    /// Rows whose age falls outside every bucket.
    pub unbucketed_ages: usize,
    pub job_durations: Vec<JobDurationStats>,
    pub seasonal_std: Vec<SeasonalStdRow>,
    pub warnings: Vec<ComputationWarning>,
    /// Files written during the run, in write order.
    pub outputs: Vec<PathBuf>,
    pub duration_ms: u64,
}

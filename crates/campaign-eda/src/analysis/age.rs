//! Age buckets and summary statistics.

use crate::error::{AnalysisError, ComputationWarning, Result, ResultExt};
use crate::loader::int_column;
use crate::stats;
use crate::types::{AgeRange, AgeStats};
use crate::utils::ensure_parent_dir;
use polars::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Column added to the table holding each row's age bucket.
pub const AGE_RANGE_COLUMN: &str = "age_range";

/// Row label of the single line in the age statistics CSV.
pub const AGE_STATS_ROW_LABEL: &str = "edad";

/// Statistic columns of the age statistics CSV, after the unnamed label column.
pub const AGE_STATS_COLUMNS: [&str; 6] =
    ["media", "mediana", "moda", "varianza", "minimo", "maximo"];

const STAGE: &str = "age_profile";

/// Output of the age profiler.
#[derive(Debug, Clone)]
pub struct AgeProfile {
    /// The input table with an extra `age_range` column. Rows outside every
    /// bucket are kept with a null range.
    pub table: DataFrame,
    pub stats: AgeStats,
}

pub struct AgeProfiler;

impl AgeProfiler {
    /// Bucket ages, compute the age statistics and write them to `output`.
    ///
    /// The parent directory of `output` is created when missing and an
    /// existing file is overwritten.
    pub fn profile(
        df: &DataFrame,
        output: &Path,
        warnings: &mut Vec<ComputationWarning>,
    ) -> Result<AgeProfile> {
        info!("Profiling ages...");

        let table = Self::with_age_ranges(df)?;

        let ages: Vec<i64> = int_column(df, "age")?.into_iter().flatten().collect();
        let stats = compute_age_stats(&ages)
            .ok_or_else(|| AnalysisError::NoValidValues("age".to_string()))?;

        if stats.variance.is_none() {
            let warning = ComputationWarning::new(
                STAGE,
                "age",
                "variance undefined for fewer than two rows; written as empty",
            );
            warn!("{}", warning);
            warnings.push(warning);
        }

        write_age_stats(&stats, output)
            .context(format!("Writing age statistics to '{}'", output.display()))?;
        info!("Age statistics saved: {}", output.display());

        Ok(AgeProfile { table, stats })
    }

    /// Return a copy of `df` with the `age_range` column added.
    pub fn with_age_ranges(df: &DataFrame) -> Result<DataFrame> {
        let labels: Vec<Option<&str>> = int_column(df, "age")?
            .into_iter()
            .map(|age| age.and_then(AgeRange::from_age).map(|range| range.label()))
            .collect();

        let unbucketed = labels.iter().filter(|label| label.is_none()).count();
        if unbucketed > 0 {
            debug!("{} rows have an age outside every bucket", unbucketed);
        }

        let mut table = df.clone();
        table.with_column(Series::new(AGE_RANGE_COLUMN.into(), labels))?;
        Ok(table)
    }
}

/// Summary statistics of a set of ages; `None` when there are no ages.
pub fn compute_age_stats(ages: &[i64]) -> Option<AgeStats> {
    let values: Vec<f64> = ages.iter().map(|&age| age as f64).collect();

    Some(AgeStats {
        mean: stats::mean(&values)?,
        median: stats::median(&values)?,
        mode: stats::mode(ages)?,
        variance: stats::sample_variance(&values),
        min: *ages.iter().min()?,
        max: *ages.iter().max()?,
    })
}

/// Write the one-row statistics table, labelled `edad` in a leading index column.
///
/// The index column has an empty name, so the header line starts with a bare
/// comma. The header is written by hand because the CSV writer quotes an
/// empty column name.
fn write_age_stats(stats: &AgeStats, output: &Path) -> Result<()> {
    let [media, mediana, moda, varianza, minimo, maximo] = AGE_STATS_COLUMNS;
    let mut frame = df!(
        "label" => [AGE_STATS_ROW_LABEL],
        media => [stats.mean],
        mediana => [stats.median],
        moda => [stats.mode],
        varianza => [stats.variance],
        minimo => [stats.min],
        maximo => [stats.max],
    )?;

    ensure_parent_dir(output)?;
    let mut file = File::create(output)?;
    writeln!(file, ",{}", AGE_STATS_COLUMNS.join(","))?;

    CsvWriter::new(&mut file)
        .include_header(false)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut frame)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_compute_age_stats() {
        let stats = compute_age_stats(&[10, 20, 20, 30]).unwrap();
        assert_eq!(stats.mean, 20.0);
        assert_eq!(stats.median, 20.0);
        assert_eq!(stats.mode, 20);
        assert_eq!(stats.min, 10);
        assert_eq!(stats.max, 30);
        assert!((stats.variance.unwrap() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_compute_age_stats_empty() {
        assert!(compute_age_stats(&[]).is_none());
    }

    #[test]
    fn test_with_age_ranges_labels_rows() {
        let df = df!("age" => [5i64, 25, 45, 65, 85]).unwrap();
        let table = AgeProfiler::with_age_ranges(&df).unwrap();

        let labels: Vec<Option<&str>> = table
            .column(AGE_RANGE_COLUMN)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            labels,
            vec![Some("0-17"), Some("18-29"), Some("40-49"), Some("60-69"), Some("70+")]
        );
    }

    #[test]
    fn test_with_age_ranges_keeps_out_of_range_rows() {
        let df = df!("age" => [0i64, 33, 150]).unwrap();
        let table = AgeProfiler::with_age_ranges(&df).unwrap();

        assert_eq!(table.height(), 3);
        let column = table.column(AGE_RANGE_COLUMN).unwrap();
        assert_eq!(column.null_count(), 2);
    }

    #[test]
    fn test_profile_writes_labelled_row() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/age_stats.csv");
        let df = df!("age" => [10i64, 20, 20, 30]).unwrap();
        let mut warnings = Vec::new();

        let profile = AgeProfiler::profile(&df, &output, &mut warnings).unwrap();
        assert_eq!(profile.stats.mode, 20);
        assert!(warnings.is_empty());

        let content = fs::read_to_string(&output).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(",media,mediana,moda,varianza,minimo,maximo"));
        let row: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(row.len(), 7);
        assert_eq!(row[0], "edad");
        assert_eq!(row[3], "20");
        assert_eq!((row[5], row[6]), ("10", "30"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_profile_single_row_warns_on_variance() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("age_stats.csv");
        let df = df!("age" => [41i64]).unwrap();
        let mut warnings = Vec::new();

        let profile = AgeProfiler::profile(&df, &output, &mut warnings).unwrap();
        assert_eq!(profile.stats.variance, None);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].subject, "age");
    }

    #[test]
    fn test_profile_empty_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let df = df!("age" => Vec::<i64>::new()).unwrap();
        let err = AgeProfiler::profile(&df, &dir.path().join("a.csv"), &mut Vec::new())
            .unwrap_err();
        assert_eq!(err.error_code(), "NO_VALID_VALUES");
    }
}

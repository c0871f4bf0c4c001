//! Data cleaning for the loaded call records.
//!
//! Cleaning removes exact duplicate rows (keeping the first occurrence) and
//! then every row with a missing value in any column. Nothing is imputed.
//! Running the cleaner on its own output changes nothing.

use crate::error::Result;
use crate::types::CleaningSummary;
use polars::prelude::*;
use tracing::{debug, info};

/// Data cleaner for removing duplicate and incomplete rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataCleaner;

impl DataCleaner {
    /// Remove duplicate rows, then rows with any null field.
    ///
    /// Surviving rows keep their original relative order.
    pub fn clean(&self, df: &DataFrame) -> Result<(DataFrame, CleaningSummary)> {
        info!("Cleaning dataset...");
        let rows_before = df.height();

        // 1. Remove duplicate rows
        let deduplicated = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let duplicates_removed = rows_before - deduplicated.height();
        if duplicates_removed > 0 {
            debug!("Removed {} duplicate rows", duplicates_removed);
        } else {
            debug!("No duplicate rows found");
        }

        // 2. Remove rows with missing values
        let cleaned = deduplicated.drop_nulls::<String>(None)?;
        let null_rows_removed = deduplicated.height() - cleaned.height();
        if null_rows_removed > 0 {
            debug!("Removed {} rows with missing values", null_rows_removed);
        } else {
            debug!("No rows with missing values found");
        }

        let summary = CleaningSummary {
            rows_before,
            duplicates_removed,
            null_rows_removed,
            rows_after: cleaned.height(),
        };

        info!(
            "Cleaning removed {} of {} rows",
            summary.rows_removed(),
            rows_before
        );

        Ok((cleaned, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn messy_frame() -> DataFrame {
        df!(
            "age" => [Some(30i64), Some(30), Some(45), None, Some(52), Some(45)],
            "job" => [Some("admin."), Some("admin."), Some("services"), Some("retired"), None, Some("services")],
            "duration" => [Some(120i64), Some(120), Some(80), Some(300), Some(95), Some(80)],
        )
        .unwrap()
    }

    #[test]
    fn test_clean_removes_duplicates_and_nulls() {
        let (cleaned, summary) = DataCleaner.clean(&messy_frame()).unwrap();

        assert_eq!(
            summary,
            CleaningSummary {
                rows_before: 6,
                duplicates_removed: 2,
                null_rows_removed: 2,
                rows_after: 2,
            }
        );
        assert_eq!(cleaned.height(), 2);
        let remaining_nulls: usize = cleaned
            .get_columns()
            .iter()
            .map(|col| col.null_count())
            .sum();
        assert_eq!(remaining_nulls, 0);
    }

    #[test]
    fn test_clean_keeps_first_occurrence_order() {
        let (cleaned, _) = DataCleaner.clean(&messy_frame()).unwrap();

        let jobs: Vec<Option<&str>> = cleaned
            .column("job")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(jobs, vec![Some("admin."), Some("services")]);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let (once, _) = DataCleaner.clean(&messy_frame()).unwrap();
        let (twice, summary) = DataCleaner.clean(&once).unwrap();

        assert!(once.equals(&twice));
        assert_eq!(summary.rows_removed(), 0);
    }

    #[test]
    fn test_clean_already_clean_frame() {
        let df = df!(
            "age" => [25i64, 35],
            "job" => ["student", "blue-collar"],
        )
        .unwrap();

        let (cleaned, summary) = DataCleaner.clean(&df).unwrap();
        assert!(cleaned.equals(&df));
        assert_eq!(summary.rows_after, 2);
    }
}

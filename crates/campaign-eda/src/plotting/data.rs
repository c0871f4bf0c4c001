//! Shapes the analysis outputs into the tables each chart draws.

use crate::analysis::age::AGE_RANGE_COLUMN;
use crate::error::{AnalysisError, Result};
use crate::types::{AgeRange, JobDurationStats, Month, SeasonalStdRow};
use polars::prelude::*;
use std::collections::BTreeSet;

/// Row count per age bucket (all seven, in order) plus the number of rows
/// without a bucket.
pub fn age_range_counts(table: &DataFrame) -> Result<(Vec<(AgeRange, usize)>, usize)> {
    let labels = table
        .column(AGE_RANGE_COLUMN)
        .map_err(|_| AnalysisError::ColumnNotFound(AGE_RANGE_COLUMN.to_string()))?
        .as_materialized_series()
        .str()?;

    let mut counts = vec![0usize; AgeRange::ALL.len()];
    let mut unbucketed = 0usize;
    for label in labels.into_iter() {
        match label.and_then(|l| AgeRange::ALL.into_iter().find(|range| range.label() == l)) {
            Some(range) => counts[range as usize] += 1,
            None => unbucketed += 1,
        }
    }

    let counts = AgeRange::ALL.into_iter().zip(counts).collect();
    Ok((counts, unbucketed))
}

/// Mean call duration in seconds per job, in report order.
pub fn mean_duration_bars(stats: &[JobDurationStats]) -> Vec<(String, f64)> {
    stats
        .iter()
        .map(|stat| (stat.job.clone(), stat.mean))
        .collect()
}

/// Standard deviations pivoted to months (rows) by marital status (columns).
///
/// Months and statuses whose cells are all undefined are left out, and a
/// cell without a defined value is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapMatrix {
    /// Row labels, in calendar order.
    pub months: Vec<Month>,
    /// Column labels, sorted.
    pub maritals: Vec<String>,
    /// `values[row][col]`
    pub values: Vec<Vec<Option<f64>>>,
}

impl HeatmapMatrix {
    pub fn from_rows(rows: &[SeasonalStdRow]) -> Self {
        let defined: Vec<(Month, &str, f64)> = rows
            .iter()
            .filter_map(|row| {
                row.std_duration
                    .map(|std| (row.month, row.marital.as_str(), std))
            })
            .collect();

        let months: Vec<Month> = defined
            .iter()
            .map(|(month, _, _)| *month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let maritals: Vec<String> = defined
            .iter()
            .map(|(_, marital, _)| *marital)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut values = vec![vec![None; maritals.len()]; months.len()];
        for (month, marital, std) in defined {
            let row = months.iter().position(|m| *m == month);
            let col = maritals.iter().position(|m| m == marital);
            if let (Some(row), Some(col)) = (row, col) {
                values[row][col] = Some(std);
            }
        }

        Self {
            months,
            maritals,
            values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Smallest and largest defined value.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut cells = self.values.iter().flatten().flatten().copied();
        let first = cells.next()?;
        Some(cells.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

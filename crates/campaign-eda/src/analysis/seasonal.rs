//! Spread of call durations by month and marital status.
//!
//! Only first-contact customers reached on a cellular phone are considered.
//! Rows are grouped by (month, marital) and ordered by calendar month, then
//! marital status.

use crate::config::{CELLULAR_CONTACT, FIRST_CONTACT_PDAYS};
use crate::error::{ComputationWarning, Result, ResultExt};
use crate::reporting::write_csv;
use crate::stats;
use crate::types::{CallRecord, Month, SeasonalStdRow};
use crate::utils::group_values;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

const STAGE: &str = "seasonal_variability";

pub struct SeasonalAnalyzer;

impl SeasonalAnalyzer {
    /// Standard deviation of call duration per (month, marital) pair.
    ///
    /// Rows whose month is not a known abbreviation cannot be placed in the
    /// calendar and are dropped with a warning. Pairs with a single call
    /// keep an undefined deviation and produce a warning.
    pub fn analyze(
        records: &[CallRecord],
        warnings: &mut Vec<ComputationWarning>,
    ) -> Vec<SeasonalStdRow> {
        info!("Analyzing seasonal call duration variability...");

        let first_contacts: Vec<&CallRecord> = records
            .iter()
            .filter(|record| {
                record.pdays == FIRST_CONTACT_PDAYS && record.contact == CELLULAR_CONTACT
            })
            .collect();
        debug!(
            "{} of {} calls are first-contact cellular calls",
            first_contacts.len(),
            records.len()
        );

        let mut unknown_months = 0usize;
        let pairs = first_contacts.iter().filter_map(|record| match Month::parse(&record.month) {
            Some(month) => Some(((month, record.marital.as_str()), record.duration as f64)),
            None => {
                unknown_months += 1;
                None
            }
        });
        let groups = group_values(pairs);

        if unknown_months > 0 {
            let warning = ComputationWarning::new(
                STAGE,
                "month",
                format!("{} rows with an unrecognized month were skipped", unknown_months),
            );
            warn!("{}", warning);
            warnings.push(warning);
        }

        // BTreeMap keys are (Month, marital), so iteration is already calendar-ordered.
        groups
            .into_iter()
            .map(|((month, marital), durations)| {
                let std_duration = stats::sample_std(&durations);
                if std_duration.is_none() {
                    let warning = ComputationWarning::new(
                        STAGE,
                        format!("{}/{}", month, marital),
                        "standard deviation undefined for a single call",
                    );
                    warn!("{}", warning);
                    warnings.push(warning);
                }

                SeasonalStdRow {
                    month,
                    marital: marital.to_string(),
                    count: durations.len(),
                    std_duration,
                }
            })
            .collect()
    }

    /// Table form with columns `month, marital, std_duration`.
    pub fn to_frame(rows: &[SeasonalStdRow]) -> Result<DataFrame> {
        let months: Vec<&str> = rows.iter().map(|row| row.month.abbrev()).collect();
        let maritals: Vec<&str> = rows.iter().map(|row| row.marital.as_str()).collect();
        let std_durations: Vec<Option<f64>> = rows.iter().map(|row| row.std_duration).collect();

        let frame = df!(
            "month" => months,
            "marital" => maritals,
            "std_duration" => std_durations,
        )?;
        Ok(frame)
    }

    /// Write the table to CSV; undefined deviations are empty cells.
    pub fn write_report(rows: &[SeasonalStdRow], output: &Path) -> Result<()> {
        let mut frame = Self::to_frame(rows)?;
        write_csv(&mut frame, output)
            .context(format!("Writing seasonal report to '{}'", output.display()))?;
        info!("Seasonal report saved: {}", output.display());
        Ok(())
    }
}

//! Loading the delimited source file and validating its schema.
//!
//! The loader fails fast: a missing required column or a non-integer value in
//! an integer column is reported at load time, before any analysis runs.

use crate::config::{INTEGER_COLUMNS, REQUIRED_COLUMNS};
use crate::error::{AnalysisError, Result, ResultExt};
use crate::types::CallRecord;
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, info};

/// Rows sampled to infer column types before the schema is enforced.
const INFER_SCHEMA_ROWS: usize = 1000;

/// Read a delimited file with a header row into a `DataFrame`.
///
/// Required columns are validated and coerced: `age`, `pdays` and
/// `duration` become `Int64`, the categorical columns become `String`.
///
/// # Errors
///
/// - `Io` when the file cannot be opened
/// - `Parse` when the content is not consistently delimited
/// - `ColumnNotFound` / `InvalidColumnType` when the schema does not match
pub fn load_dataset(path: &Path, separator: u8) -> Result<DataFrame> {
    info!("Loading dataset from: {}", path.display());

    let mut file = File::open(path).context(format!("Cannot open '{}'", path.display()))?;

    check_field_counts(&mut file, separator)
        .map_err(|e| AnalysisError::Parse(format!("{}: {}", path.display(), e)))?;
    file.seek(SeekFrom::Start(0))
        .context(format!("Rewinding '{}'", path.display()))?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_quote_char(Some(b'"')),
        )
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| AnalysisError::Parse(format!("{}: {}", path.display(), e)))?;

    let df = enforce_schema(df)?;
    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

/// Reject any record whose field count differs from the header's.
///
/// The CSV reader pads short rows with nulls, which the cleaner would then
/// drop without a trace.
fn check_field_counts(file: &mut File, separator: u8) -> std::result::Result<(), csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(separator)
        .quote(b'"')
        .has_headers(true)
        .flexible(false)
        .from_reader(file);

    let mut rows = 0usize;
    for record in reader.records() {
        record?;
        rows += 1;
    }
    debug!("Scanned {} records with consistent field counts", rows);
    Ok(())
}

/// Check the required columns exist and coerce them to their expected types.
pub fn enforce_schema(mut df: DataFrame) -> Result<DataFrame> {
    for name in REQUIRED_COLUMNS {
        if df.column(name).is_err() {
            return Err(AnalysisError::ColumnNotFound(name.to_string()));
        }
    }

    for name in REQUIRED_COLUMNS {
        let series = df.column(name)?.as_materialized_series().clone();
        let target = if INTEGER_COLUMNS.contains(&name) {
            DataType::Int64
        } else {
            DataType::String
        };

        if series.dtype() == &target {
            continue;
        }

        let converted =
            series
                .strict_cast(&target)
                .map_err(|e| AnalysisError::InvalidColumnType {
                    column: name.to_string(),
                    expected: if target == DataType::Int64 {
                        "integer".to_string()
                    } else {
                        "text".to_string()
                    },
                    reason: e.to_string(),
                })?;

        debug!("Coerced '{}' from {} to {}", name, series.dtype(), target);
        df.replace(name, converted)?;
    }

    Ok(df)
}

/// Extract the typed record view of a cleaned table.
///
/// Fails with `InvalidColumnType` when a required field is null; run the
/// cleaner first.
pub fn extract_records(df: &DataFrame) -> Result<Vec<CallRecord>> {
    let age = int_column(df, "age")?;
    let pdays = int_column(df, "pdays")?;
    let duration = int_column(df, "duration")?;
    let job = str_column(df, "job")?;
    let marital = str_column(df, "marital")?;
    let month = str_column(df, "month")?;
    let contact = str_column(df, "contact")?;

    let mut records = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        records.push(CallRecord {
            age: required(age[idx], "age", idx)?,
            job: required(job[idx], "job", idx)?.to_string(),
            marital: required(marital[idx], "marital", idx)?.to_string(),
            month: required(month[idx], "month", idx)?.to_string(),
            contact: required(contact[idx], "contact", idx)?.to_string(),
            pdays: required(pdays[idx], "pdays", idx)?,
            duration: required(duration[idx], "duration", idx)?,
        });
    }

    debug!("Extracted {} typed records", records.len());
    Ok(records)
}

/// Values of an integer column, coercing if the table skipped [`enforce_schema`].
pub(crate) fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let series = df
        .column(name)
        .map_err(|_| AnalysisError::ColumnNotFound(name.to_string()))?
        .as_materialized_series()
        .strict_cast(&DataType::Int64)
        .map_err(|e| AnalysisError::InvalidColumnType {
            column: name.to_string(),
            expected: "integer".to_string(),
            reason: e.to_string(),
        })?;

    Ok(series.i64()?.into_iter().collect())
}

fn str_column<'a>(df: &'a DataFrame, name: &str) -> Result<Vec<Option<&'a str>>> {
    let series = df
        .column(name)
        .map_err(|_| AnalysisError::ColumnNotFound(name.to_string()))?
        .as_materialized_series();

    let values = series.str().map_err(|e| AnalysisError::InvalidColumnType {
        column: name.to_string(),
        expected: "text".to_string(),
        reason: e.to_string(),
    })?;

    Ok(values.into_iter().collect())
}

fn required<T>(value: Option<T>, column: &str, row: usize) -> Result<T> {
    value.ok_or_else(|| AnalysisError::InvalidColumnType {
        column: column.to_string(),
        expected: "non-null".to_string(),
        reason: format!("missing value at row {}", row),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const HEADER: &str = "\"age\";\"job\";\"marital\";\"month\";\"contact\";\"pdays\";\"duration\";\"y\"";

    #[test]
    fn test_load_semicolon_file() {
        let file = write_temp(&format!(
            "{}\n58;\"management\";\"married\";\"may\";\"cellular\";-1;261;\"no\"\n\
             44;\"technician\";\"single\";\"jun\";\"unknown\";120;151;\"yes\"\n",
            HEADER
        ));

        let df = load_dataset(file.path(), b';').unwrap();
        assert_eq!(df.shape(), (2, 8));
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("job").unwrap().dtype(), &DataType::String);

        let records = extract_records(&df).unwrap();
        assert_eq!(records[0].job, "management");
        assert_eq!(records[0].pdays, -1);
        assert_eq!(records[1].duration, 151);
        assert_eq!(records[1].contact, "unknown");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_dataset(Path::new("does/not/exist.csv"), b';').unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let file = write_temp("age;job;marital;month;contact;pdays\n30;admin.;single;may;cellular;-1\n");
        let err = load_dataset(file.path(), b';').unwrap_err();
        assert!(matches!(err, AnalysisError::ColumnNotFound(ref c) if c == "duration"));
    }

    #[test]
    fn test_non_integer_age_is_schema_error() {
        let file = write_temp(&format!(
            "{}\nold;\"management\";\"married\";\"may\";\"cellular\";-1;261;\"no\"\n",
            HEADER
        ));
        let err = load_dataset(file.path(), b';').unwrap_err();
        assert_eq!(err.error_code(), "INVALID_COLUMN_TYPE");
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_ragged_rows_are_parse_error() {
        let file = write_temp(&format!(
            "{}\n58;\"management\";\"married\";\"may\";\"cellular\";-1;261;\"no\";\"extra\";\"more\"\n",
            HEADER
        ));
        let err = load_dataset(file.path(), b';').unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_short_rows_are_parse_error() {
        let file = write_temp(&format!(
            "{}\n58;\"management\";\"married\";\"may\";\"cellular\";-1;261;\"no\"\n\
             41;\"admin.\";\"single\"\n",
            HEADER
        ));
        let err = load_dataset(file.path(), b';').unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert!(err.to_string().contains("record"));
    }

    #[test]
    fn test_extract_records_rejects_nulls() {
        let df = df!(
            "age" => [Some(30i64), None],
            "job" => ["admin.", "services"],
            "marital" => ["single", "married"],
            "month" => ["may", "jun"],
            "contact" => ["cellular", "cellular"],
            "pdays" => [-1i64, -1],
            "duration" => [100i64, 200],
        )
        .unwrap();

        let err = extract_records(&df).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_COLUMN_TYPE");
    }
}

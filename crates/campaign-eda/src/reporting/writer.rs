use crate::error::Result;
use crate::utils::ensure_parent_dir;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Write a table as comma-separated values with a header row.
///
/// Parent directories are created on demand; an existing file is replaced.
/// Null cells are written empty.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path)?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)?;

    debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

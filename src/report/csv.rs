//! CSV serialization of a result set (Arrow CSV writer)

use crate::experiment::ResultSet;
use crate::{Error, Result};
use arrow::csv::WriterBuilder;
use std::path::Path;

/// Serialize `results` as CSV: a header row with the report labels, then one
/// row per record in configuration order.
///
/// # Errors
///
/// Returns [`Error::EmptyResults`] for an empty set, or the Arrow error if
/// encoding fails.
pub fn to_csv_bytes(results: &ResultSet) -> Result<Vec<u8>> {
    if results.is_empty() {
        return Err(Error::EmptyResults);
    }

    let batch = results.to_record_batch()?;
    let mut buffer = Vec::new();
    {
        let mut writer = WriterBuilder::new().with_header(true).build(&mut buffer);
        writer.write(&batch)?;
    }

    Ok(buffer)
}

/// Write `results` as CSV to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns error if encoding or the file write fails.
pub fn write_csv(results: &ResultSet, path: &Path) -> Result<()> {
    let bytes = to_csv_bytes(results)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

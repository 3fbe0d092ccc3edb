//! Streaming CSV output.

use crate::types::{ExtractError, ListingRow, LISTING_FIELDS};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Streaming sink that writes rows to a CSV destination as they arrive.
///
/// The fixed header goes out when the sink is opened, so a run that
/// produces zero rows still leaves a well-formed table behind. Rows are
/// never buffered; quoting and escaping follow the csv crate's RFC 4180
/// conventions, and null cells render as empty fields.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows_written: u64,
}

impl CsvSink<File> {
    /// Open `path` for writing, creating its parent directory if absent.
    pub fn create(path: &Path) -> Result<Self, ExtractError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| {
                    ExtractError::OutputUnwritable {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
            }
        }
        let file = File::create(path).map_err(|source| ExtractError::OutputUnwritable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_writer(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap an arbitrary writer. The header row is written immediately.
    pub fn from_writer(writer: W) -> Result<Self, ExtractError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(LISTING_FIELDS)?;
        Ok(CsvSink {
            writer,
            rows_written: 0,
        })
    }

    /// Append one row.
    pub fn write_row(&mut self, row: &ListingRow) -> Result<(), ExtractError> {
        self.writer.serialize(row)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush the destination and return the number of rows written,
    /// header excluded.
    pub fn finish(mut self) -> Result<u64, ExtractError> {
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(self.rows_written)
    }
}

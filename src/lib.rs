//! # Sluice - car listing extraction
//!
//! A streaming extractor that pulls individual listing records out of
//! very large raw JSON dumps and lands them in a fixed-schema CSV table.
//! Dumps are often a single enormous line, so the extractor never parses
//! the whole document: it scans for the `"cars":[` array, cuts out one
//! brace-balanced object at a time, and decodes only those spans.
//!
//! ## Stages
//!
//! - **scanner**: locate the array and iterate its object spans
//! - **decoder**: strict JSON decode of one span, dropping bad spans
//! - **normalizer**: project onto the eleven-field listing schema
//! - **writer**: stream rows to CSV behind a fixed header
//!
//! ## Quick Start
//!
//! ```rust
//! use sluice::{decode_span, normalize, FieldValue, ObjectSpans};
//!
//! let dump = r#"{"total":1,"cars":[{"_id":"1","brand":"Fiat","price":120000}]}"#;
//!
//! let rows: Vec<_> = ObjectSpans::new(dump.to_string())
//!     .filter_map(decode_span)
//!     .map(normalize)
//!     .collect();
//!
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].brand, FieldValue::Str("Fiat".to_string()));
//! assert_eq!(rows[0].series, FieldValue::Null);
//! ```
//!
//! For whole files, [`extract_to_csv`] chains the stages across an
//! ordered file list and returns the row count written.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

pub mod extract;
pub mod types;

// Re-export the pipeline surface for convenience
pub use extract::{decode_span, find_array_start, normalize, CsvSink, ObjectSpans, ARRAY_MARKER};
pub use types::{ExtractError, FieldValue, ListingRow, LISTING_FIELDS};

/// File name patterns picked up when no explicit inputs are given.
const INPUT_PATTERNS: [&str; 2] = ["*.txt", "*.tx"];

/// Read one input file as text, dropping byte sequences that are not
/// valid UTF-8 instead of failing the file.
fn read_document(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            let bytes = err.into_bytes();
            let mut text = String::with_capacity(bytes.len());
            for chunk in bytes.utf8_chunks() {
                text.push_str(chunk.valid());
            }
            Ok(text)
        }
    }
}

/// Lazy row sequence over an ordered list of input files.
///
/// Files are processed in list order and each file's rows keep their
/// source array order, so the stream is deterministic end to end. One
/// file's document is read in full before its scan begins, but rows are
/// handed out one at a time and no file's row set is ever materialized.
///
/// A file that cannot be read surfaces as an `Err` item at its position
/// in the stream; callers that stop on the first error treat it as fatal
/// for the run.
pub struct RowStream {
    paths: std::vec::IntoIter<PathBuf>,
    current: Option<ObjectSpans>,
}

impl RowStream {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        RowStream {
            paths: paths.into_iter(),
            current: None,
        }
    }
}

impl Iterator for RowStream {
    type Item = Result<ListingRow, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(spans) = self.current.as_mut() {
                for span in spans.by_ref() {
                    if let Some(object) = decode_span(span) {
                        return Some(Ok(normalize(object)));
                    }
                }
                self.current = None;
            }

            let path = self.paths.next()?;
            log::debug!("scanning {}", path.display());
            match read_document(&path) {
                Ok(document) => self.current = Some(ObjectSpans::new(document)),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Run the whole pipeline: extract every listing in `inputs` into a CSV
/// file at `output` and return the number of rows written.
///
/// An empty input list is an error; an input with no `"cars":[` marker is
/// not, it just contributes zero rows.
pub fn extract_to_csv(inputs: &[PathBuf], output: &Path) -> Result<u64, ExtractError> {
    if inputs.is_empty() {
        return Err(ExtractError::NoInputFiles);
    }

    let mut sink = CsvSink::create(output)?;
    for row in RowStream::new(inputs.to_vec()) {
        sink.write_row(&row?)?;
    }
    sink.finish()
}

/// Default input selection: files directly inside `dir` whose names match
/// `*.txt` or `*.tx`, sorted and de-duplicated.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let patterns = input_globs();
    let entries = std::fs::read_dir(dir).map_err(|source| ExtractError::FileUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ExtractError::FileUnreadable {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && patterns.is_match(Path::new(&entry.file_name())) {
            paths.push(path);
        }
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

fn input_globs() -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in INPUT_PATTERNS {
        builder.add(Glob::new(pattern).expect("static input pattern"));
    }
    builder.build().expect("static input pattern set")
}

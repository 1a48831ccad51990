//! CSV output sink for successful probe results.
//!
//! The sink is truncated and recreated at the start of every run, writes
//! the header immediately, and then appends one row per successful outcome.
//! Only the single collection loop ever writes to it, so no locking is
//! needed.

use crate::error::ProbeError;
use crate::types::ResultRow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Header row written at the top of every output file.
pub const HEADER: &str = "bssid,lat,lon,accuracy";

/// Append-only CSV writer for result rows.
pub struct CsvSink {
    writer: BufWriter<File>,
    path: String,
}

impl CsvSink {
    /// Create (or truncate) the output file and write the header.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::Sink` if the file cannot be created or the
    /// header cannot be written. Callers treat this as fatal and abort
    /// before dispatching anything.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, ProbeError> {
        let path_str = path.as_ref().display().to_string();
        let file = File::create(path.as_ref())
            .map_err(|e| ProbeError::sink(path_str.clone(), e.to_string()))?;

        let mut sink = Self {
            writer: BufWriter::new(file),
            path: path_str,
        };
        writeln!(sink.writer, "{}", HEADER)
            .map_err(|e| ProbeError::sink(sink.path.clone(), e.to_string()))?;
        Ok(sink)
    }

    /// Append one result row. `None` fields render as empty columns,
    /// matching the tolerant 200-body decoding.
    pub fn write_row(&mut self, row: &ResultRow) -> Result<(), ProbeError> {
        writeln!(
            self.writer,
            "{},{},{},{}",
            row.bssid,
            field(row.lat),
            field(row.lon),
            field(row.accuracy),
        )
        .map_err(|e| ProbeError::sink(self.path.clone(), e.to_string()))
    }

    /// Flush buffered rows to disk.
    pub fn flush(&mut self) -> Result<(), ProbeError> {
        self.writer
            .flush()
            .map_err(|e| ProbeError::sink(self.path.clone(), e.to_string()))
    }

    /// Path this sink writes to.
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

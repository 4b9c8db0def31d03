//! CSV export of crawled chart entries
//!
//! Output is UTF-8 with a byte-order mark so spreadsheet tools detect the
//! encoding; header row, comma-delimited, no index column. `rating` and
//! `num_ratings` are coerced to numbers and unparsable values are written
//! as empty fields.

#![allow(clippy::uninlined_format_args)]

use crate::domain::movie::{MOVIE_COLUMNS, MovieRecord, MovieRow};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// UTF-8 byte-order mark
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error while exporting: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes chart entries to CSV
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Write all records to `path`, returning the number of rows written.
    ///
    /// The parent directory is created when missing.
    pub fn write(&self, records: &[MovieRecord], path: &Path) -> Result<usize, ExportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                debug!("Created output directory {:?}", parent);
            }
        }

        let file = File::create(path)?;
        let count = self.write_to(records, BufWriter::new(file))?;

        info!("Saved {} records to {}", count, path.display());
        Ok(count)
    }

    /// Write BOM, header and rows to any writer
    pub fn write_to<W: Write>(&self, records: &[MovieRecord], mut writer: W) -> Result<usize, ExportError> {
        writer.write_all(UTF8_BOM)?;

        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        // Header is written explicitly so an empty crawl still produces it
        csv_writer.write_record(MOVIE_COLUMNS)?;
        for record in records {
            csv_writer.serialize(MovieRow::from(record))?;
        }
        csv_writer.flush()?;

        Ok(records.len())
    }
}

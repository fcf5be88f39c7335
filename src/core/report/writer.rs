//! CSV output for ledger rows

use crate::core::ledger::{LedgerRow, COLUMNS};
use crate::domain::{LedgerError, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of a report: `{domain_prefix}_sales_history_{unix_seconds}.csv`
pub fn report_file_name(domain_prefix: &str, unix_seconds: i64) -> String {
    format!("{domain_prefix}_sales_history_{unix_seconds}.csv")
}

/// Streams a header and ledger rows as CSV
pub struct LedgerWriter<W: Write> {
    inner: csv::Writer<W>,
    rows_written: usize,
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: csv::WriterBuilder::new().from_writer(writer),
            rows_written: 0,
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.inner.write_record(COLUMNS)?;
        Ok(())
    }

    pub fn write_row(&mut self, row: &LedgerRow) -> Result<()> {
        self.inner.write_record(row.cells())?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of data rows written so far, header excluded
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush buffered output and hand back the underlying writer
    pub fn finish(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| LedgerError::Output(format!("Failed to flush report: {e}")))
    }
}

/// Write a complete report (header then `rows`) to a new file at `path`
pub fn write_report_file(path: &Path, rows: &[LedgerRow]) -> Result<PathBuf> {
    let file = File::create(path).map_err(|e| {
        LedgerError::Output(format!(
            "Failed to create report file {}: {e}",
            path.display()
        ))
    })?;

    let mut writer = LedgerWriter::new(file);
    writer.write_header()?;
    for row in rows {
        writer.write_row(row)?;
    }
    writer.finish()?.sync_all()?;

    Ok(path.to_path_buf())
}

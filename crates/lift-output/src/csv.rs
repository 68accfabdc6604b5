//! CSV output backend.
//!
//! Creates `calls.csv` in the configured output directory, one row per call
//! in generation order:
//!
//! ```csv
//! next_floor,demand_floor,call_datetime
//! 0,5,2023-11-04T14:52:54.869802+00:00
//! ```

use std::fs::File;
use std::path::Path;

use chrono::SecondsFormat;
use csv::Writer;
use lift_core::CallRecord;
use tracing::debug;

use crate::{OutputError, OutputResult};
use crate::writer::RecordSink;

pub const CSV_FILE_NAME: &str = "calls.csv";

/// Writes call records to a CSV file.
pub struct CsvSink {
    calls:    Writer<File>,
    finished: bool,
}

impl CsvSink {
    /// Create (or truncate) `calls.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let path = dir.join(CSV_FILE_NAME);
        let mut calls = Writer::from_path(&path)?;
        calls.write_record(["next_floor", "demand_floor", "call_datetime"])?;
        debug!(path = %path.display(), "csv sink opened");

        Ok(Self { calls, finished: false })
    }
}

impl RecordSink for CsvSink {
    fn write_record(&mut self, record: &CallRecord) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        self.calls.write_record(&[
            record.next_floor.to_string(),
            record.demand_floor.to_string(),
            record.call_time.to_rfc3339_opts(SecondsFormat::Micros, false),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.calls.flush()?;
        Ok(())
    }
}

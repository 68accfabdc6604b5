//! Parquet output backend (feature `parquet`).
//!
//! Creates `calls.parquet` in the configured output directory.  Records are
//! buffered and written as row groups of up to [`BATCH_ROWS`] rows.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{TimestampMicrosecondBuilder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use lift_core::CallRecord;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::RecordSink;
use crate::{OutputError, OutputResult};

pub const PARQUET_FILE_NAME: &str = "calls.parquet";

/// Rows buffered before a record batch is handed to the Parquet writer.
pub const BATCH_ROWS: usize = 8_192;

const TIMEZONE: &str = "UTC";

fn call_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("next_floor",    DataType::UInt32, false),
        Field::new("demand_floor",  DataType::UInt32, false),
        Field::new(
            "call_datetime",
            DataType::Timestamp(TimeUnit::Microsecond, Some(TIMEZONE.into())),
            false,
        ),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes call records to a Parquet file.
///
/// `finish()` **must** be called to write the Parquet footer; a file written
/// without it cannot be opened by Parquet readers.
pub struct ParquetSink {
    writer:  Option<ArrowWriter<File>>,
    schema:  Arc<Schema>,
    pending: Vec<CallRecord>,
}

impl ParquetSink {
    /// Create `calls.parquet` in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let schema = call_schema();
        let file = File::create(dir.join(PARQUET_FILE_NAME))?;
        let writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;

        Ok(Self {
            writer: Some(writer),
            schema,
            pending: Vec::with_capacity(BATCH_ROWS),
        })
    }

    fn flush_pending(&mut self) -> OutputResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        let mut next_floors   = UInt32Builder::with_capacity(self.pending.len());
        let mut demand_floors = UInt32Builder::with_capacity(self.pending.len());
        let mut call_times    =
            TimestampMicrosecondBuilder::with_capacity(self.pending.len()).with_timezone(TIMEZONE);

        for record in self.pending.drain(..) {
            next_floors.append_value(record.next_floor.0);
            demand_floors.append_value(record.demand_floor.0);
            call_times.append_value(record.call_time.timestamp_micros());
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.schema),
            vec![
                Arc::new(next_floors.finish()),
                Arc::new(demand_floors.finish()),
                Arc::new(call_times.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }
}

impl RecordSink for ParquetSink {
    fn write_record(&mut self, record: &CallRecord) -> OutputResult<()> {
        if self.writer.is_none() {
            return Err(OutputError::Finished);
        }
        self.pending.push(*record);
        if self.pending.len() >= BATCH_ROWS {
            self.flush_pending()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.flush_pending()?;
        if let Some(w) = self.writer.take() {
            w.close()?;
        }
        Ok(())
    }
}

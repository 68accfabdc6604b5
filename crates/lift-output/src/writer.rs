//! The `RecordSink` trait implemented by all backends.

use lift_core::CallRecord;

use crate::OutputResult;

/// Destination for generated call records.
///
/// Implementations must surface every persistence failure through the
/// returned `Result`; a record is never dropped silently.  Retry policy, if
/// any, belongs to the implementation.
pub trait RecordSink {
    /// Persist one record.
    fn write_record(&mut self, record: &CallRecord) -> OutputResult<()>;

    /// Persist several records in order.  Backends override this when they
    /// can write a batch more cheaply than one record at a time.
    fn write_batch(&mut self, records: &[CallRecord]) -> OutputResult<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Flush and close underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn write_record(&mut self, record: &CallRecord) -> OutputResult<()> {
        (**self).write_record(record)
    }

    fn write_batch(&mut self, records: &[CallRecord]) -> OutputResult<()> {
        (**self).write_batch(records)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}

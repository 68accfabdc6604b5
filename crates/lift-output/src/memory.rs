//! In-memory sink.

use lift_core::CallRecord;

use crate::writer::RecordSink;
use crate::{OutputError, OutputResult};

/// Keeps every record in a `Vec`, in write order.
///
/// Writing after [`finish`](RecordSink::finish) fails with
/// [`OutputError::Finished`], which makes the sink useful for checking that a
/// driver stops writing once it has closed its sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    records:  Vec<CallRecord>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<CallRecord> {
        self.records
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl RecordSink for MemorySink {
    fn write_record(&mut self, record: &CallRecord) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        self.records.push(*record);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finished = true;
        Ok(())
    }
}

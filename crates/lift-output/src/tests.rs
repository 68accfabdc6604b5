//! Unit tests for lift-output.

#[cfg(test)]
fn record(next: u32, demand: u32, minute: u32) -> lift_core::CallRecord {
    use chrono::{TimeZone, Utc};

    let call_time = Utc.with_ymd_and_hms(2023, 11, 4, 14, minute, 0).unwrap();
    lift_core::CallRecord::new(lift_core::FloorId(next), lift_core::FloorId(demand), call_time).unwrap()
}

#[cfg(test)]
mod memory_tests {
    use super::record;
    use crate::writer::RecordSink;
    use crate::{MemorySink, OutputError};

    #[test]
    fn keeps_write_order() {
        let mut sink = MemorySink::new();
        sink.write_record(&record(0, 3, 0)).unwrap();
        sink.write_batch(&[record(2, 1, 1), record(1, 0, 2)]).unwrap();
        let floors: Vec<u32> = sink.records().iter().map(|r| r.next_floor.0).collect();
        assert_eq!(floors, [0, 2, 1]);
    }

    #[test]
    fn write_after_finish_fails() {
        let mut sink = MemorySink::new();
        sink.finish().unwrap();
        assert!(sink.is_finished());
        assert!(matches!(sink.write_record(&record(0, 1, 0)), Err(OutputError::Finished)));
    }

    #[test]
    fn boxed_sink_delegates() {
        let mut sink: Box<dyn RecordSink> = Box::new(MemorySink::new());
        sink.write_record(&record(0, 1, 0)).unwrap();
        sink.finish().unwrap();
        assert!(matches!(sink.write_record(&record(0, 1, 1)), Err(OutputError::Finished)));
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::record;
    use crate::csv::{CSV_FILE_NAME, CsvSink};
    use crate::writer::RecordSink;
    use crate::OutputError;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_file_created_with_header() {
        let dir = tmp();
        let mut sink = CsvSink::new(dir.path()).unwrap();
        sink.finish().unwrap();

        let mut rdr = ::csv::Reader::from_path(dir.path().join(CSV_FILE_NAME)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["next_floor", "demand_floor", "call_datetime"]);
    }

    #[test]
    fn csv_rows_in_write_order() {
        let dir = tmp();
        let mut sink = CsvSink::new(dir.path()).unwrap();
        sink.write_batch(&[record(0, 5, 52), record(3, 0, 53)]).unwrap();
        sink.finish().unwrap();

        let mut rdr = ::csv::Reader::from_path(dir.path().join(CSV_FILE_NAME)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][1], "5");
        assert_eq!(&rows[0][2], "2023-11-04T14:52:00.000000+00:00");
        assert_eq!(&rows[1][0], "3");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut sink = CsvSink::new(dir.path()).unwrap();
        sink.finish().unwrap();
        sink.finish().unwrap();
    }

    #[test]
    fn write_after_finish_fails() {
        let dir = tmp();
        let mut sink = CsvSink::new(dir.path()).unwrap();
        sink.write_record(&record(0, 5, 52)).unwrap();
        sink.finish().unwrap();

        assert!(matches!(sink.write_record(&record(3, 0, 53)), Err(OutputError::Finished)));
        sink.finish().unwrap();

        let mut rdr = ::csv::Reader::from_path(dir.path().join(CSV_FILE_NAME)).unwrap();
        assert_eq!(rdr.records().count(), 1);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvSink::new(&dir.path().join("does/not/exist")).is_err());
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use chrono::{TimeZone, Utc};
    use lift_core::{CallId, FloorId};

    use super::record;
    use crate::sqlite::{CallUpdate, SQLITE_FILE_NAME, SqliteStore};
    use crate::writer::RecordSink;
    use crate::OutputError;

    #[test]
    fn db_file_created() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SqliteStore::new(dir.path()).unwrap();
        store.finish().unwrap();
        assert!(dir.path().join(SQLITE_FILE_NAME).exists());
    }

    #[test]
    fn create_then_get() {
        let store = SqliteStore::open_in_memory().unwrap();
        let created = store.create(&record(0, 5, 52)).unwrap();
        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.record.next_floor, FloorId(0));
        assert_eq!(fetched.record.demand_floor, FloorId(5));
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(store.get(CallId(99)), Err(OutputError::NotFound(CallId(99)))));
    }

    #[test]
    fn list_is_most_recent_first() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.write_batch(&[record(0, 1, 10), record(1, 2, 30), record(2, 3, 20)]).unwrap();
        let minutes: Vec<u32> = store
            .list()
            .unwrap()
            .iter()
            .map(|c| c.record.next_floor.0)
            .collect();
        assert_eq!(minutes, [1, 2, 0]);
    }

    #[test]
    fn sink_writes_persist_every_record() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = SqliteStore::new(dir.path()).unwrap();
            for minute in 0..20 {
                store.write_record(&record(minute % 4, 4, minute)).unwrap();
            }
            store.finish().unwrap();
        }
        let store = SqliteStore::new(dir.path()).unwrap();
        assert_eq!(store.count().unwrap(), 20);
    }

    #[test]
    fn update_applies_only_given_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        let created = store.create(&record(0, 5, 52)).unwrap();
        let new_time = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();

        let updated = store
            .update(created.id, CallUpdate { demand_floor: Some(FloorId(7)), call_time: Some(new_time), ..Default::default() })
            .unwrap();
        assert_eq!(updated.record.next_floor, FloorId(0));
        assert_eq!(updated.record.demand_floor, FloorId(7));
        assert_eq!(store.get(created.id).unwrap().record.call_time, new_time);
    }

    #[test]
    fn update_cannot_make_floors_equal() {
        let store = SqliteStore::open_in_memory().unwrap();
        let created = store.create(&record(0, 5, 52)).unwrap();
        let result = store.update(created.id, CallUpdate { next_floor: Some(FloorId(5)), ..Default::default() });
        assert!(matches!(result, Err(OutputError::Record(_))));
        assert_eq!(store.get(created.id).unwrap(), created);
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(store.update(CallId(3), CallUpdate::default()), Err(OutputError::NotFound(_))));
    }

    #[test]
    fn delete_removes_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let created = store.create(&record(0, 5, 52)).unwrap();
        store.delete(created.id).unwrap();
        assert!(matches!(store.get(created.id), Err(OutputError::NotFound(_))));
        assert!(matches!(store.delete(created.id), Err(OutputError::NotFound(_))));
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use arrow::datatypes::{DataType, TimeUnit};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::record;
    use crate::parquet::{PARQUET_FILE_NAME, ParquetSink};
    use crate::writer::RecordSink;
    use crate::OutputError;

    #[test]
    fn parquet_round_trip_row_count_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ParquetSink::new(dir.path()).unwrap();
        for minute in 0..5 {
            sink.write_record(&record(minute, minute + 1, minute)).unwrap();
        }
        sink.finish().unwrap();

        let file = std::fs::File::open(dir.path().join(PARQUET_FILE_NAME)).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let total_rows: usize = builder.build().unwrap().map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 5);

        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, ["next_floor", "demand_floor", "call_datetime"]);
        assert!(matches!(
            schema.field_with_name("call_datetime").unwrap().data_type(),
            DataType::Timestamp(TimeUnit::Microsecond, _)
        ));
    }

    #[test]
    fn write_after_finish_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = ParquetSink::new(dir.path()).unwrap();
        sink.finish().unwrap();
        sink.finish().unwrap();
        assert!(matches!(sink.write_record(&record(0, 1, 0)), Err(OutputError::Finished)));
    }
}

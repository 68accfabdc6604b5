//! `lift-output` — record sinks for generated lift calls.
//!
//! Four backends, the heavier ones behind Cargo features:
//!
//! | Feature   | Backend        | Created                                        |
//! |-----------|----------------|------------------------------------------------|
//! | *(none)*  | `MemorySink`   | nothing — records kept in a `Vec`              |
//! | *(none)*  | `CsvSink`      | `calls.csv`                                    |
//! | `sqlite`  | `SqliteStore`  | `calls.db`, table `elevator`                   |
//! | `parquet` | `ParquetSink`  | `calls.parquet`                                |
//!
//! All backends implement [`RecordSink`].  The generator writes one record at
//! a time in generation order and calls [`RecordSink::finish`] once at the
//! end of the run, on both the success and the failure path.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_output::{CsvSink, RecordSink};
//!
//! let mut sink = CsvSink::new(Path::new("./output"))?;
//! sink.write_record(&record)?;
//! sink.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod memory;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvSink;
pub use error::{OutputError, OutputResult};
pub use memory::MemorySink;
pub use writer::RecordSink;

#[cfg(feature = "sqlite")]
pub use sqlite::{CallUpdate, SqliteStore, StoredCall};

#[cfg(feature = "parquet")]
pub use parquet::ParquetSink;

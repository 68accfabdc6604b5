//! SQLite output backend and call store (feature `sqlite`).
//!
//! Creates `calls.db` in the configured output directory with one table:
//!
//! ```sql
//! CREATE TABLE elevator (
//!     id            INTEGER PRIMARY KEY AUTOINCREMENT,
//!     next_floor    INTEGER NOT NULL,
//!     demand_floor  INTEGER NOT NULL,
//!     call_datetime TEXT    NOT NULL
//! );
//! ```
//!
//! Besides acting as a [`RecordSink`], the store exposes create / get / list /
//! update / delete over the persisted calls.  Updates take a [`CallUpdate`]
//! whose `None` fields leave the stored value unchanged.
//!
//! Each `write_record` is its own autocommit insert, so a run that fails
//! half-way leaves the records written so far in the table.

use std::path::Path;

use chrono::{DateTime, Utc};
use lift_core::{CallId, CallRecord, FloorId};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use crate::writer::RecordSink;
use crate::{OutputError, OutputResult};

pub const SQLITE_FILE_NAME: &str = "calls.db";

const SELECT_CALL: &str = "SELECT id, next_floor, demand_floor, call_datetime FROM elevator";

/// A persisted call together with its row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredCall {
    pub id:     CallId,
    pub record: CallRecord,
}

/// Partial update of a stored call.  `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallUpdate {
    pub next_floor:   Option<FloorId>,
    pub demand_floor: Option<FloorId>,
    pub call_time:    Option<DateTime<Utc>>,
}

/// Call records in an SQLite database.
pub struct SqliteStore {
    conn:     Connection,
    finished: bool,
}

impl SqliteStore {
    /// Open (or create) `calls.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Self::open(&dir.join(SQLITE_FILE_NAME))
    }

    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> OutputResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;",
        )?;
        info!(path = %path.display(), "sqlite store opened");
        Self::with_connection(conn)
    }

    /// Private in-memory database; contents vanish on drop.
    pub fn open_in_memory() -> OutputResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> OutputResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS elevator (
                 id            INTEGER PRIMARY KEY AUTOINCREMENT,
                 next_floor    INTEGER NOT NULL,
                 demand_floor  INTEGER NOT NULL,
                 call_datetime TEXT    NOT NULL
             );",
        )?;
        Ok(Self { conn, finished: false })
    }

    /// Insert one call and return it with its new id.
    pub fn create(&self, record: &CallRecord) -> OutputResult<StoredCall> {
        self.conn
            .prepare_cached(
                "INSERT INTO elevator (next_floor, demand_floor, call_datetime) \
                 VALUES (?1, ?2, ?3)",
            )?
            .execute(params![record.next_floor.0, record.demand_floor.0, record.call_time])?;
        let id = CallId(self.conn.last_insert_rowid());
        debug!(%id, next = %record.next_floor, demand = %record.demand_floor, "call stored");
        Ok(StoredCall { id, record: *record })
    }

    pub fn get(&self, id: CallId) -> OutputResult<StoredCall> {
        self.conn
            .prepare_cached(&format!("{SELECT_CALL} WHERE id = ?1"))?
            .query_row(params![id.0], stored_call_from_row)
            .optional()?
            .ok_or(OutputError::NotFound(id))
    }

    /// Every stored call, most recent `call_datetime` first.
    pub fn list(&self) -> OutputResult<Vec<StoredCall>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_CALL} ORDER BY call_datetime DESC, id DESC"))?;
        let rows = stmt.query_map([], stored_call_from_row)?;
        let calls = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(calls)
    }

    /// Apply `update` to call `id` and return the stored result.
    ///
    /// The merged record must still have distinct floors.
    pub fn update(&self, id: CallId, update: CallUpdate) -> OutputResult<StoredCall> {
        let current = self.get(id)?.record;
        let record = CallRecord::new(
            update.next_floor.unwrap_or(current.next_floor),
            update.demand_floor.unwrap_or(current.demand_floor),
            update.call_time.unwrap_or(current.call_time),
        )?;
        self.conn
            .prepare_cached(
                "UPDATE elevator SET next_floor = ?1, demand_floor = ?2, call_datetime = ?3 \
                 WHERE id = ?4",
            )?
            .execute(params![record.next_floor.0, record.demand_floor.0, record.call_time, id.0])?;
        Ok(StoredCall { id, record })
    }

    pub fn delete(&self, id: CallId) -> OutputResult<()> {
        let deleted = self
            .conn
            .prepare_cached("DELETE FROM elevator WHERE id = ?1")?
            .execute(params![id.0])?;
        if deleted == 0 {
            return Err(OutputError::NotFound(id));
        }
        debug!(%id, "call deleted");
        Ok(())
    }

    pub fn count(&self) -> OutputResult<u64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM elevator", [], |r| r.get(0))?;
        Ok(n as u64)
    }
}

impl RecordSink for SqliteStore {
    fn write_record(&mut self, record: &CallRecord) -> OutputResult<()> {
        self.create(record).map(|_| ())
    }

    fn write_batch(&mut self, records: &[CallRecord]) -> OutputResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO elevator (next_floor, demand_floor, call_datetime) \
                 VALUES (?1, ?2, ?3)",
            )?;
            for record in records {
                stmt.execute(params![record.next_floor.0, record.demand_floor.0, record.call_time])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

fn stored_call_from_row(row: &Row<'_>) -> rusqlite::Result<StoredCall> {
    Ok(StoredCall {
        id:     CallId(row.get(0)?),
        record: CallRecord {
            next_floor:   FloorId(row.get(1)?),
            demand_floor: FloorId(row.get(2)?),
            call_time:    row.get(3)?,
        },
    })
}

//! Call timestamp model.
//!
//! # Design
//!
//! Calls are numbered `0, 1, 2, …` in generation order.  The mapping to
//! wall-clock time is held in `TimestampSequencer`:
//!
//!   call_time(i) = start + i * interval
//!
//! Keeping the call index as the canonical unit means the sequence is exact
//! (no accumulated drift) and strictly increasing for any positive interval.
//! The default interval is 60 s, one call per minute.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::{LiftError, LiftResult};

/// Default spacing between consecutive calls.
pub const DEFAULT_INTERVAL_SECS: u32 = 60;

/// Produces the timestamp of the `i`-th generated call.
///
/// Cheap to copy; holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimestampSequencer {
    start:         DateTime<Utc>,
    interval_secs: u32,
}

impl TimestampSequencer {
    /// Sequencer starting at `start` with calls `interval_secs` apart.
    ///
    /// A zero interval is rejected: timestamps must be strictly increasing.
    pub fn new(start: DateTime<Utc>, interval_secs: u32) -> LiftResult<Self> {
        if interval_secs == 0 {
            return Err(LiftError::Config(
                "call interval must be at least one second".to_string(),
            ));
        }
        Ok(Self { start, interval_secs })
    }

    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[inline]
    pub fn interval_secs(&self) -> u32 {
        self.interval_secs
    }

    /// Timestamp of call `index`.  Fails only if the result leaves chrono's
    /// representable range.
    pub fn at(&self, index: u64) -> LiftResult<DateTime<Utc>> {
        let offset = i64::try_from(index)
            .ok()
            .and_then(|i| i.checked_mul(self.interval_secs as i64))
            .and_then(Duration::try_seconds)
            .and_then(|d| self.start.checked_add_signed(d));
        offset.ok_or_else(|| {
            LiftError::Config(format!("call {index} is beyond the representable time range"))
        })
    }

    /// The first `count` timestamps, in order.
    pub fn sequence(&self, count: usize) -> LiftResult<Vec<DateTime<Utc>>> {
        (0..count as u64).map(|i| self.at(i)).collect()
    }
}

impl fmt::Display for TimestampSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} every {}s", self.start.to_rfc3339(), self.interval_secs)
    }
}

/// `count` timestamps starting at `start`, `interval_secs` apart.
pub fn sequence(
    count:         usize,
    start:         DateTime<Utc>,
    interval_secs: u32,
) -> LiftResult<Vec<DateTime<Utc>>> {
    TimestampSequencer::new(start, interval_secs)?.sequence(count)
}

//! Run configuration.

use chrono::{DateTime, Utc};
use lift_core::time::DEFAULT_INTERVAL_SECS;

/// Default number of calls per run.
pub const DEFAULT_DATASET_LENGTH: usize = 20;

/// Default bound on demand-floor draws per call.
pub const DEFAULT_MAX_DEMAND_ATTEMPTS: u32 = 1_000;

/// Parameters of one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenConfig {
    /// Number of calls emitted by `Generator::run`.
    pub dataset_length:      usize,
    /// Timestamp of the first call.
    pub start:               DateTime<Utc>,
    /// Seconds between consecutive calls.  Must be positive.
    pub interval_secs:       u32,
    /// Draws allowed for a demand floor different from the origin floor
    /// before the run fails with `SamplingExhausted`.
    pub max_demand_attempts: u32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            dataset_length:      DEFAULT_DATASET_LENGTH,
            start:               Utc::now(),
            interval_secs:       DEFAULT_INTERVAL_SECS,
            max_demand_attempts: DEFAULT_MAX_DEMAND_ATTEMPTS,
        }
    }
}

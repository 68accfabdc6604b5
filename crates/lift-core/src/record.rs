//! The generated call record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{FloorId, LiftError, LiftResult};

/// One elevator call: the floor the cabin is called to (`next_floor`), the
/// floor the passenger asks for (`demand_floor`), and when.
///
/// Invariant: `next_floor != demand_floor`.  Created by the sampler and handed
/// straight to a sink; never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub next_floor:   FloorId,
    pub demand_floor: FloorId,
    #[serde(rename = "call_datetime")]
    pub call_time:    DateTime<Utc>,
}

impl CallRecord {
    /// Build a record, rejecting a call whose origin equals its destination.
    pub fn new(
        next_floor:   FloorId,
        demand_floor: FloorId,
        call_time:    DateTime<Utc>,
    ) -> LiftResult<Self> {
        if next_floor == demand_floor {
            return Err(LiftError::InvalidRecord(format!(
                "next_floor and demand_floor are both {next_floor}"
            )));
        }
        Ok(Self { next_floor, demand_floor, call_time })
    }
}

//! `lift-core` — foundational types for the lift call-dataset generator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `FloorId`, `CallId`                                   |
//! | [`rules`]       | `BusinessRules` (validated JSON configuration)        |
//! | [`layout`]      | `FloorLayout` — ground / garage / regular floors      |
//! | [`record`]      | `CallRecord` — one generated elevator call            |
//! | [`time`]        | `TimestampSequencer` — call index → timestamp         |
//! | [`rng`]         | `SimRng` (seeded or entropy-backed)                   |
//! | [`error`]       | `LiftError`, `LiftResult`                             |

pub mod error;
pub mod ids;
pub mod layout;
pub mod record;
pub mod rng;
pub mod rules;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{LiftError, LiftResult};
pub use ids::{CallId, FloorId};
pub use layout::FloorLayout;
pub use record::CallRecord;
pub use rng::SimRng;
pub use rules::BusinessRules;
pub use time::TimestampSequencer;

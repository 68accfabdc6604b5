//! `lift-model` — the demand model of the lift call-dataset generator.
//!
//! # Pipeline
//!
//! ```text
//! BusinessRules + FloorDemographics
//!   ├─ by_floor_rank  → rank distribution        (next_floor)
//!   ├─ by_population  → population distribution
//!   ├─ by_age         → age distribution
//!   └─ combine(rank, population, age) + residual correction
//!                     → demand distribution      (demand_floor)
//! ```
//!
//! Everything here is a pure function of its inputs: the same rules and
//! demographics always yield the same distributions.  Randomness only enters
//! through [`FloorDemographics::generate`] and the sampler in `lift-gen`.

pub mod demographics;
pub mod distribution;
pub mod error;
pub mod weights;


pub use demographics::{DemographicRanges, FloorDemographics, FloorStats};
pub use distribution::{Distribution, normalize};
pub use error::{ModelError, ModelResult};
pub use weights::{Degenerate, WeightModel, by_age, by_floor_rank, by_population, combine};

//! `lift-gen` — call sampling and the generation driver.
//!
//! # Pipeline
//!
//! ```text
//! GeneratorBuilder::build()
//!   ① Demographics — supplied, or drawn from DemographicRanges with SimRng
//!   ② WeightModel  — rank / population / age / demand distributions
//!   ③ CallSampler  — WeightedIndex over the renormalized rank and demand
//!
//! Generator::run(sink, observer)
//!   for i in 0..dataset_length:
//!     next_floor   ← rank distribution
//!     demand_floor ← demand distribution, redrawn while == next_floor
//!                    (at most max_demand_attempts draws)
//!     call_time    ← start + i * interval
//!     sink.write_record(CallRecord)
//!   sink.finish()            (also when the loop failed)
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::{BusinessRules, FloorLayout, SimRng};
//! use lift_gen::{GenConfig, GeneratorBuilder, NoopObserver};
//! use lift_output::MemorySink;
//!
//! let rules = BusinessRules::from_json_path("business_rules.json")?;
//! let layout = FloorLayout::from_rules(10, &rules)?;
//! let mut generator = GeneratorBuilder::new(rules, layout, GenConfig::default())
//!     .rng(SimRng::new(42))
//!     .build()?;
//! let mut sink = MemorySink::new();
//! let summary = generator.run(&mut sink, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod generator;
pub mod observer;
pub mod sampler;

#[cfg(test)]
mod tests;

pub use builder::GeneratorBuilder;
pub use config::GenConfig;
pub use error::{GenError, GenResult};
pub use generator::{Generator, RunSummary};
pub use observer::{GenObserver, NoopObserver};
pub use sampler::{CallSampler, FloorSampler};

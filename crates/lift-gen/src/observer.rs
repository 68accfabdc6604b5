//! Generator observer trait for progress reporting and inspection.

use lift_core::CallRecord;
use lift_model::{FloorDemographics, WeightModel};

use crate::RunSummary;

/// Callbacks invoked by [`Generator::run`][crate::Generator::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: distribution printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl GenObserver for Printer {
///     fn on_model(&mut self, model: &WeightModel) {
///         println!("demand: {}", model.demand);
///     }
/// }
/// ```
pub trait GenObserver {
    /// Called once before the first call is sampled.
    fn on_demographics(&mut self, _demographics: &FloorDemographics) {}

    /// Called once before the first call is sampled, after `on_demographics`.
    fn on_model(&mut self, _model: &WeightModel) {}

    /// Called after record `index` has been accepted by the sink.
    fn on_record(&mut self, _index: usize, _record: &CallRecord) {}

    /// Called once after a successful run, when the sink has been finished.
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

/// A [`GenObserver`] that does nothing.
pub struct NoopObserver;

impl GenObserver for NoopObserver {}

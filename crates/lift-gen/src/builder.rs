//! Fluent builder for constructing a [`Generator`].

use lift_core::{BusinessRules, FloorLayout, SimRng, TimestampSequencer};
use lift_model::{DemographicRanges, FloorDemographics, ModelError, WeightModel};
use tracing::info;

use crate::{CallSampler, GenConfig, GenError, GenResult, Generator};

/// Fluent builder for [`Generator`].
///
/// # Required inputs
///
/// - [`BusinessRules`] — the validated weights
/// - [`FloorLayout`] — regular floors plus ground / garage
/// - [`GenConfig`] — dataset length, start time, interval, retry bound
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                     |
/// |----------------------|---------------------------------------------|
/// | `.demographics(d)`   | Drawn from `ranges` with the run's RNG      |
/// | `.ranges(r)`         | `DemographicRanges::default()` (`[1,10)`, `[18,90)`) |
/// | `.rng(r)`            | `SimRng::from_entropy()`                    |
///
/// # Example
///
/// ```rust,ignore
/// let mut generator = GeneratorBuilder::new(rules, layout, config)
///     .ranges(DemographicRanges { population: 1..10, avg_age: 18..90 })
///     .rng(SimRng::new(7))
///     .build()?;
/// generator.run(&mut sink, &mut NoopObserver)?;
/// ```
pub struct GeneratorBuilder {
    rules:        BusinessRules,
    layout:       FloorLayout,
    config:       GenConfig,
    demographics: Option<FloorDemographics>,
    ranges:       DemographicRanges,
    rng:          Option<SimRng>,
}

impl GeneratorBuilder {
    pub fn new(rules: BusinessRules, layout: FloorLayout, config: GenConfig) -> Self {
        Self {
            rules,
            layout,
            config,
            demographics: None,
            ranges:       DemographicRanges::default(),
            rng:          None,
        }
    }

    /// Use fixed demographics instead of drawing them.  Must be built for the
    /// same layout as the generator.
    pub fn demographics(mut self, demographics: FloorDemographics) -> Self {
        self.demographics = Some(demographics);
        self
    }

    /// Sampling ranges for generated demographics.  Ignored when
    /// `.demographics(..)` is supplied.
    pub fn ranges(mut self, ranges: DemographicRanges) -> Self {
        self.ranges = ranges;
        self
    }

    /// RNG driving demographics and call sampling.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate inputs, derive the weight model and samplers, and return a
    /// ready-to-run [`Generator`].
    ///
    /// Nothing is sampled for the calls here, so a configuration error never
    /// leaves partial output behind.
    pub fn build(self) -> GenResult<Generator> {
        // ── Validate configuration ────────────────────────────────────────
        self.rules.validate()?;
        // Fields are public, so a layout may bypass `FloorLayout::new`.
        let layout = FloorLayout::new(self.layout.total_floors, self.layout.has_garage)?;
        let sequencer = TimestampSequencer::new(self.config.start, self.config.interval_secs)?;

        let mut rng = self.rng.unwrap_or_else(SimRng::from_entropy);

        // ── Resolve demographics ──────────────────────────────────────────
        let demographics = match self.demographics {
            Some(d) => {
                if d.floors().len() != layout.len() {
                    return Err(ModelError::FloorCountMismatch {
                        expected: layout.len(),
                        got:      d.floors().len(),
                        what:     "floor demographics",
                    }
                    .into());
                }
                if d.layout() != layout {
                    return Err(GenError::Config(format!(
                        "demographics built for {:?}, generator uses {:?}",
                        d.layout(),
                        layout,
                    )));
                }
                d
            }
            None => FloorDemographics::generate(layout, &self.ranges, &mut rng)?,
        };

        // ── Weight model and samplers ─────────────────────────────────────
        let model = WeightModel::build(&self.rules, &demographics);
        let sampler = CallSampler::new(&model, self.config.max_demand_attempts)?;

        info!(
            floors = layout.total_floors,
            garage = layout.has_garage,
            calls  = self.config.dataset_length,
            %sequencer,
            "generator ready",
        );

        Ok(Generator::new(self.config, sequencer, demographics, model, sampler, rng))
    }
}

//! The `Generator` struct and its emission loop.

use chrono::{DateTime, Utc};
use lift_core::{CallRecord, SimRng, TimestampSequencer};
use lift_model::{FloorDemographics, WeightModel};
use lift_output::RecordSink;
use tracing::{debug, info, warn};

use crate::{CallSampler, GenConfig, GenObserver, GenResult};

/// Outcome of a successful [`Generator::run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records accepted by the sink.
    pub records:          usize,
    pub first_call:       Option<DateTime<Utc>>,
    pub last_call:        Option<DateTime<Utc>>,
    /// Demand draws rejected because they equalled the origin floor.
    pub demand_resamples: u64,
}

/// Emits call records for one building.
///
/// All distributions are fixed at build time; only the sampler's draws are
/// random.  Create via [`GeneratorBuilder`][crate::GeneratorBuilder].
pub struct Generator {
    config:       GenConfig,
    sequencer:    TimestampSequencer,
    demographics: FloorDemographics,
    model:        WeightModel,
    sampler:      CallSampler,
    rng:          SimRng,
}

impl Generator {
    pub(crate) fn new(
        config:       GenConfig,
        sequencer:    TimestampSequencer,
        demographics: FloorDemographics,
        model:        WeightModel,
        sampler:      CallSampler,
        rng:          SimRng,
    ) -> Self {
        Self { config, sequencer, demographics, model, sampler, rng }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    pub fn demographics(&self) -> &FloorDemographics {
        &self.demographics
    }

    pub fn model(&self) -> &WeightModel {
        &self.model
    }

    pub fn sampler(&self) -> &CallSampler {
        &self.sampler
    }

    /// Sample call `index` without writing it anywhere.
    pub fn next_record(&mut self, index: u64) -> GenResult<CallRecord> {
        let (next, demand) = self.sampler.sample_pair(&mut self.rng)?;
        let call_time = self.sequencer.at(index)?;
        Ok(CallRecord::new(next, demand, call_time)?)
    }

    /// Emit `config.dataset_length` records into `sink`.
    ///
    /// The sink is finished on both paths.  When the loop fails, records
    /// written before the failure stay in the sink and the loop's error is
    /// returned; a failing `finish` is then only logged.  Running again
    /// restarts the timestamps at `config.start` but continues the RNG
    /// stream.
    pub fn run<S, O>(&mut self, sink: &mut S, observer: &mut O) -> GenResult<RunSummary>
    where
        S: RecordSink + ?Sized,
        O: GenObserver,
    {
        info!(calls = self.config.dataset_length, "generation started");
        observer.on_demographics(&self.demographics);
        observer.on_model(&self.model);

        let outcome = self.emit(sink, observer);
        if let Err(e) = sink.finish() {
            if outcome.is_ok() {
                return Err(e.into());
            }
            warn!(error = %e, "sink finish failed after an earlier error");
        }
        let summary = outcome?;

        observer.on_run_end(&summary);
        info!(
            records   = summary.records,
            resamples = summary.demand_resamples,
            "generation finished",
        );
        Ok(summary)
    }

    // ── Emission loop ─────────────────────────────────────────────────────

    fn emit<S, O>(&mut self, sink: &mut S, observer: &mut O) -> GenResult<RunSummary>
    where
        S: RecordSink + ?Sized,
        O: GenObserver,
    {
        let resamples_before = self.sampler.resamples();
        let mut summary = RunSummary::default();

        for i in 0..self.config.dataset_length {
            let record = self.next_record(i as u64)?;
            sink.write_record(&record)?;
            debug!(
                index  = i,
                next   = %record.next_floor,
                demand = %record.demand_floor,
                at     = %record.call_time,
                "call emitted",
            );
            observer.on_record(i, &record);

            summary.first_call = summary.first_call.or(Some(record.call_time));
            summary.last_call = Some(record.call_time);
            summary.records += 1;
        }

        summary.demand_resamples = self.sampler.resamples() - resamples_before;
        Ok(summary)
    }
}

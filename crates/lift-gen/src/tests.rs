//! Unit tests for lift-gen.

use chrono::{DateTime, TimeZone, Utc};
use lift_core::{BusinessRules, CallRecord, FloorLayout, SimRng};
use lift_model::FloorDemographics;

use crate::{GenConfig, GeneratorBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn rules() -> BusinessRules {
    BusinessRules::from_json_str(
        r#"{
            "weight_garage": 0.1,
            "weight_ground": 0.3,
            "old_people_limit": 60,
            "weight_young": 0.2,
            "weight_floor": 0.4,
            "weight_people": 0.4,
            "weight_age": 0.2
        }"#,
    )
    .unwrap()
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 11, 4, 14, 52, 0).unwrap()
}

fn config(dataset_length: usize) -> GenConfig {
    GenConfig { dataset_length, start: start(), ..GenConfig::default() }
}

/// Ten regular floors plus ground and garage.
fn layout() -> FloorLayout {
    FloorLayout::from_rules(10, &rules()).unwrap()
}

fn builder(dataset_length: usize, seed: u64) -> GeneratorBuilder {
    GeneratorBuilder::new(rules(), layout(), config(dataset_length)).rng(SimRng::new(seed))
}

// ── Sampler ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sampler_tests {
    use lift_core::{FloorId, SimRng};
    use lift_model::{Degenerate, Distribution, WeightModel};

    use crate::{CallSampler, FloorSampler, GenError};

    fn model(rank: Vec<f64>, demand: Vec<f64>) -> WeightModel {
        let len = rank.len();
        WeightModel {
            rank:       Distribution::new(rank),
            population: Distribution::zeros(len),
            age:        Distribution::zeros(len),
            demand:     Distribution::new(demand),
            degenerate: Vec::<Degenerate>::new(),
        }
    }

    #[test]
    fn sampler_renormalizes_weights() {
        // Sums to 1.399.
        let sampler = FloorSampler::new(&Distribution::new(vec![0.1, 0.3, 0.333, 0.333, 0.333])).unwrap();
        let total: f64 = (0..5).map(|i| sampler.weight(FloorId(i))).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_empty_negative_and_zero_mass() {
        for weights in [vec![], vec![0.5, -0.1, 0.6], vec![0.0, 0.0], vec![f64::NAN, 1.0]] {
            let result = FloorSampler::new(&Distribution::new(weights.clone()));
            assert!(
                matches!(result, Err(GenError::DegenerateDistribution(_))),
                "{weights:?} accepted"
            );
        }
    }

    #[test]
    fn zero_weight_floor_never_drawn() {
        let sampler = FloorSampler::new(&Distribution::new(vec![0.0, 0.5, 0.5])).unwrap();
        let mut rng = SimRng::new(1);
        for _ in 0..1_000 {
            assert_ne!(sampler.sample(&mut rng), FloorId(0));
        }
    }

    #[test]
    fn frequencies_follow_weights() {
        let sampler = FloorSampler::new(&Distribution::new(vec![0.1, 0.3, 0.6])).unwrap();
        let mut rng = SimRng::new(11);
        let mut counts = [0usize; 3];
        let n = 20_000;
        for _ in 0..n {
            counts[sampler.sample(&mut rng).index()] += 1;
        }
        for (count, expected) in counts.iter().zip([0.1, 0.3, 0.6]) {
            let freq = *count as f64 / n as f64;
            assert!((freq - expected).abs() < 0.02, "{counts:?}");
        }
    }

    #[test]
    fn demand_never_equals_excluded() {
        let mut sampler = CallSampler::new(&model(vec![0.5, 0.5, 0.0], vec![0.6, 0.3, 0.1]), 1_000).unwrap();
        let mut rng = SimRng::new(5);
        for _ in 0..2_000 {
            let (next, demand) = sampler.sample_pair(&mut rng).unwrap();
            assert_ne!(next, demand);
        }
        assert!(sampler.resamples() > 0);
    }

    #[test]
    fn all_mass_on_excluded_fails_fast() {
        let mut sampler = CallSampler::new(&model(vec![0.0, 1.0, 0.0], vec![0.0, 1.0, 0.0]), 1_000).unwrap();
        let mut rng = SimRng::new(5);
        let next = sampler.sample_next_floor(&mut rng);
        assert_eq!(next, FloorId(1));
        let result = sampler.sample_demand_floor(&mut rng, next);
        assert!(matches!(result, Err(GenError::DegenerateDistribution(_))));
        assert_eq!(sampler.resamples(), 0);
    }

    #[test]
    fn retries_are_bounded() {
        // The second floor carries mass but is never reachable by a draw.
        let mut sampler = CallSampler::new(&model(vec![1.0, 0.0], vec![1.0, 1e-300]), 25).unwrap();
        let mut rng = SimRng::new(5);
        let result = sampler.sample_demand_floor(&mut rng, FloorId(0));
        assert!(matches!(
            result,
            Err(GenError::SamplingExhausted { excluded: FloorId(0), attempts: 25 })
        ));
        assert_eq!(sampler.resamples(), 25);
    }

    #[test]
    fn zero_attempts_rejected() {
        let result = CallSampler::new(&model(vec![0.5, 0.5], vec![0.5, 0.5]), 0);
        assert!(matches!(result, Err(GenError::Config(_))));
    }
}

// ── GeneratorBuilder validation ───────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use lift_core::LiftError;
    use lift_model::{DemographicRanges, ModelError};

    use super::*;
    use crate::GenError;

    #[test]
    fn builds_with_generated_demographics() {
        let generator = builder(5, 1).build().unwrap();
        assert_eq!(generator.demographics().floors().len(), 12);
        assert!((generator.model().demand.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn fixed_demographics_are_used() {
        let demo = FloorDemographics::from_regular(layout(), &[5; 10], &[30.0; 10]).unwrap();
        let generator = builder(5, 1).demographics(demo.clone()).build().unwrap();
        assert_eq!(generator.demographics(), &demo);
    }

    #[test]
    fn demographics_length_mismatch_errors() {
        let other = FloorLayout::new(4, true).unwrap();
        let demo = FloorDemographics::from_regular(other, &[5; 4], &[30.0; 4]).unwrap();
        let result = builder(5, 1).demographics(demo).build();
        assert!(matches!(
            result,
            Err(GenError::Model(ModelError::FloorCountMismatch { expected: 12, got: 6, .. }))
        ));
    }

    #[test]
    fn demographics_layout_mismatch_errors() {
        // Same length, different garage placement.
        let garage = FloorLayout::new(10, true).unwrap();
        let no_garage = FloorLayout::new(11, false).unwrap();
        let demo = FloorDemographics::from_regular(no_garage, &[5; 11], &[30.0; 11]).unwrap();
        let result = GeneratorBuilder::new(rules(), garage, config(5)).demographics(demo).build();
        assert!(matches!(result, Err(GenError::Config(_))));
    }

    #[test]
    fn zero_floor_layout_errors() {
        let layout = FloorLayout { total_floors: 0, has_garage: true };
        let result = GeneratorBuilder::new(rules(), layout, config(5)).build();
        assert!(matches!(result, Err(GenError::Core(LiftError::Config(_)))));
    }

    #[test]
    fn empty_range_errors() {
        let result = builder(5, 1)
            .ranges(DemographicRanges { population: 5..5, avg_age: 18..90 })
            .build();
        assert!(matches!(result, Err(GenError::Model(ModelError::EmptyRange { .. }))));
    }

    #[test]
    fn zero_interval_errors() {
        let cfg = GenConfig { interval_secs: 0, ..config(5) };
        let result = GeneratorBuilder::new(rules(), layout(), cfg).build();
        assert!(matches!(result, Err(GenError::Core(LiftError::Config(_)))));
    }

    #[test]
    fn invalid_rules_error_before_sampling() {
        let mut bad = rules();
        bad.weight_ground = 0.95;
        let result = GeneratorBuilder::new(bad, layout(), config(5)).build();
        assert!(matches!(result, Err(GenError::Core(LiftError::Config(_)))));
    }
}

// ── Generator::run ────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use std::io;

    use lift_model::WeightModel;
    use lift_output::{MemorySink, OutputError, OutputResult, RecordSink};

    use super::*;
    use crate::{GenError, GenObserver, NoopObserver, RunSummary};

    /// Fails on the `fail_at`-th write and counts `finish` calls.
    struct FailingSink {
        fail_at:      usize,
        written:      Vec<CallRecord>,
        finish_calls: usize,
    }

    impl RecordSink for FailingSink {
        fn write_record(&mut self, record: &CallRecord) -> OutputResult<()> {
            if self.written.len() == self.fail_at {
                return Err(OutputError::Io(io::Error::other("disk full")));
            }
            self.written.push(*record);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finish_calls += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recorder {
        models:  usize,
        indices: Vec<usize>,
        ended:   Option<RunSummary>,
    }

    impl GenObserver for Recorder {
        fn on_model(&mut self, _model: &WeightModel) {
            self.models += 1;
        }

        fn on_record(&mut self, index: usize, _record: &CallRecord) {
            self.indices.push(index);
        }

        fn on_run_end(&mut self, summary: &RunSummary) {
            self.ended = Some(summary.clone());
        }
    }

    #[test]
    fn emits_dataset_length_records() {
        let mut generator = builder(20, 42).build().unwrap();
        let mut sink = MemorySink::new();
        let summary = generator.run(&mut sink, &mut NoopObserver).unwrap();

        assert_eq!(summary.records, 20);
        assert_eq!(sink.records().len(), 20);
        assert!(sink.is_finished());
    }

    #[test]
    fn floors_distinct_and_in_range() {
        let mut generator = builder(500, 3).build().unwrap();
        let mut sink = MemorySink::new();
        generator.run(&mut sink, &mut NoopObserver).unwrap();

        for r in sink.records() {
            assert_ne!(r.next_floor, r.demand_floor);
            assert!(r.next_floor.index() < 12);
            assert!(r.demand_floor.index() < 12);
        }
    }

    #[test]
    fn timestamps_strictly_increasing_at_interval() {
        let mut generator = builder(30, 9).build().unwrap();
        let mut sink = MemorySink::new();
        let summary = generator.run(&mut sink, &mut NoopObserver).unwrap();

        let records = sink.records();
        assert_eq!(records[0].call_time, start());
        for pair in records.windows(2) {
            assert_eq!((pair[1].call_time - pair[0].call_time).num_seconds(), 60);
        }
        assert_eq!(summary.first_call, Some(start()));
        assert_eq!(summary.last_call, Some(records[29].call_time));
    }

    #[test]
    fn empty_dataset_still_finishes_sink() {
        let mut generator = builder(0, 1).build().unwrap();
        let mut sink = MemorySink::new();
        let summary = generator.run(&mut sink, &mut NoopObserver).unwrap();

        assert_eq!(summary, RunSummary::default());
        assert!(sink.is_finished());
    }

    #[test]
    fn same_seed_same_dataset() {
        let run = |seed| {
            let mut sink = MemorySink::new();
            builder(50, seed).build().unwrap().run(&mut sink, &mut NoopObserver).unwrap();
            sink.into_records()
        };
        assert_eq!(run(17), run(17));
        assert_ne!(run(17), run(18));
    }

    #[test]
    fn sink_failure_propagates_and_finishes() {
        let mut generator = builder(10, 4).build().unwrap();
        let mut sink = FailingSink { fail_at: 3, written: Vec::new(), finish_calls: 0 };
        let mut observer = Recorder::default();

        let result = generator.run(&mut sink, &mut observer);
        assert!(matches!(result, Err(GenError::Sink(OutputError::Io(_)))));
        assert_eq!(sink.written.len(), 3);
        assert_eq!(sink.finish_calls, 1);
        assert_eq!(observer.indices, [0, 1, 2]);
        assert!(observer.ended.is_none());
    }

    #[test]
    fn observer_sees_model_records_and_end() {
        let mut generator = builder(5, 8).build().unwrap();
        let mut sink = MemorySink::new();
        let mut observer = Recorder::default();
        let summary = generator.run(&mut sink, &mut observer).unwrap();

        assert_eq!(observer.models, 1);
        assert_eq!(observer.indices, [0, 1, 2, 3, 4]);
        assert_eq!(observer.ended, Some(summary));
    }

    #[test]
    fn boxed_dyn_sink_accepted() {
        let mut generator = builder(3, 8).build().unwrap();
        let mut sink: Box<dyn RecordSink> = Box::new(MemorySink::new());
        let summary = generator.run(sink.as_mut(), &mut NoopObserver).unwrap();
        assert_eq!(summary.records, 3);
    }
}

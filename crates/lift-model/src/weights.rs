//! Weight distributions derived from business rules and demographics.
//!
//! | Builder           | Regular floors                               | Special floors           |
//! |-------------------|----------------------------------------------|--------------------------|
//! | [`by_floor_rank`] | `round((1 - ground - garage) / T, 3)` each   | `weight_ground/_garage`  |
//! | [`by_population`] | `population[i] / Σ population`               | 0                        |
//! | [`by_age`]        | `1/T`, scaled by the old / young factor      | 0                        |
//! | [`combine`]       | `rank·w_floor + pop·w_people + age·w_age`    | same blend               |
//!
//! `T` is the number of regular floors.

use lift_core::{BusinessRules, FloorLayout};
use tracing::{debug, warn};

use crate::{Distribution, FloorDemographics};

/// A model input with no usable signal.  The affected distribution falls back
/// to its uniform baseline instead of dividing by zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Degenerate {
    /// Every regular floor is at or above `old_people_limit`.
    AllOld,
    /// No regular floor reaches `old_people_limit`.
    AllYoung,
    /// Total population is zero.
    NoPopulation,
}

/// The four distributions of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightModel {
    /// Drives `next_floor`.
    pub rank:       Distribution,
    pub population: Distribution,
    pub age:        Distribution,
    /// Drives `demand_floor`.  Residual-corrected, sums to 1.
    pub demand:     Distribution,
    /// Fallbacks taken while building `population` and `age`.
    pub degenerate: Vec<Degenerate>,
}

impl WeightModel {
    pub fn build(rules: &BusinessRules, demographics: &FloorDemographics) -> Self {
        let layout = demographics.layout();
        let mut degenerate = Vec::new();

        let rank = by_floor_rank(rules, &layout);
        let (population, pop_fallback) = population_weights(demographics);
        let (age, age_fallback) = age_weights(rules, demographics);
        degenerate.extend(pop_fallback);
        degenerate.extend(age_fallback);
        for signal in &degenerate {
            warn!(?signal, "degenerate demographic signal; using uniform baseline");
        }

        let demand = combine(rules, &rank, &population, &age).correct_residual(&layout);

        debug!(%rank, %population, %age, %demand, "weight model built");
        Self { rank, population, age, demand, degenerate }
    }
}

/// Equal share of the non-reserved mass per regular floor, rounded to 3
/// decimals, with the ground (and garage) weights from the rules.
///
/// Rounding means the result need not sum to exactly 1; the sampler
/// renormalizes before drawing.
pub fn by_floor_rank(rules: &BusinessRules, layout: &FloorLayout) -> Distribution {
    let remaining = 1.0 - (rules.weight_ground + rules.weight_garage);
    let share = round3(remaining / layout.total_floors as f64);

    let mut weights = vec![share; layout.len()];
    weights[0] = rules.weight_ground;
    if layout.has_garage {
        weights[1] = rules.weight_garage;
    }
    Distribution::new(weights)
}

/// Each floor's share of the building population.
///
/// With nobody living in the building the uniform regular-floor baseline is
/// returned instead.
pub fn by_population(demographics: &FloorDemographics) -> Distribution {
    population_weights(demographics).0
}

/// Age-adjusted weights: floors at or above `old_people_limit` give up part of
/// their baseline, younger floors gain.
///
/// When all regular floors are old or all are young one of the factors would
/// divide by zero; the unmodified baseline `1/T` is returned instead.
pub fn by_age(rules: &BusinessRules, demographics: &FloorDemographics) -> Distribution {
    age_weights(rules, demographics).0
}

/// Blend the three signals with the rules' coefficients.  The result is not
/// residual-corrected.
pub fn combine(
    rules:      &BusinessRules,
    rank:       &Distribution,
    population: &Distribution,
    age:        &Distribution,
) -> Distribution {
    let weights = rank
        .weights()
        .iter()
        .zip(population.weights())
        .zip(age.weights())
        .map(|((r, p), a)| r * rules.weight_floor + p * rules.weight_people + a * rules.weight_age)
        .collect();
    Distribution::new(weights)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn population_weights(demographics: &FloorDemographics) -> (Distribution, Option<Degenerate>) {
    let layout = demographics.layout();
    let total = demographics.total_population();
    if total == 0 {
        return (uniform_regular(&layout), Some(Degenerate::NoPopulation));
    }
    let weights = demographics
        .floors()
        .iter()
        .map(|f| f.population as f64 / total as f64)
        .collect();
    (Distribution::new(weights), None)
}

fn age_weights(
    rules:        &BusinessRules,
    demographics: &FloorDemographics,
) -> (Distribution, Option<Degenerate>) {
    let layout = demographics.layout();
    let floors = demographics.floors();
    let total = layout.total_floors as usize;
    let is_old = |i: usize| floors[i].avg_age >= rules.old_people_limit;

    let old_count = layout.regular().filter(|&i| is_old(i)).count();
    let baseline = uniform_regular(&layout);
    if old_count == total {
        return (baseline, Some(Degenerate::AllOld));
    }
    if old_count == 0 {
        return (baseline, Some(Degenerate::AllYoung));
    }

    let old_factor = 1.0 - (1.0 - rules.weight_young) / old_count as f64;
    let young_factor = 1.0 + rules.weight_young / (total - old_count) as f64;

    let mut weights = baseline.weights().to_vec();
    for i in layout.regular() {
        weights[i] *= if is_old(i) { old_factor } else { young_factor };
    }
    (Distribution::new(weights), None)
}

/// `1/T` on every regular floor, 0 on special floors.
fn uniform_regular(layout: &FloorLayout) -> Distribution {
    let share = 1.0 / layout.total_floors as f64;
    let weights = (0..layout.len())
        .map(|i| if layout.is_special(i) { 0.0 } else { share })
        .collect();
    Distribution::new(weights)
}

#[inline]
fn round3(x: f64) -> f64 {
    (x * 1_000.0).round() / 1_000.0
}

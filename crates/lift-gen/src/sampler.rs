//! Weighted floor sampling.
//!
//! [`FloorSampler`] renormalizes a [`Distribution`] and draws floor indices
//! from it with `rand`'s `WeightedIndex`.  [`CallSampler`] pairs two of them:
//! the rank distribution for `next_floor` and the demand distribution for
//! `demand_floor`, redrawing the latter while it equals the former.

use lift_core::{FloorId, SimRng};
use lift_model::{Distribution, WeightModel};
use rand::distributions::{Distribution as _, WeightedIndex};
use tracing::warn;

use crate::{GenError, GenResult};

// ── FloorSampler ──────────────────────────────────────────────────────────────

/// Draws floor indices in proportion to a weight vector.
#[derive(Clone, Debug)]
pub struct FloorSampler {
    index:   WeightedIndex<f64>,
    /// Normalized weights, sum 1.
    weights: Vec<f64>,
}

impl FloorSampler {
    /// Fails with `DegenerateDistribution` when `dist` is empty, has a
    /// negative or non-finite entry, or carries no mass at all.
    pub fn new(dist: &Distribution) -> GenResult<Self> {
        if dist.is_empty() {
            return Err(GenError::DegenerateDistribution("no floors to sample".into()));
        }
        if let Some((floor, w)) = dist
            .weights()
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(GenError::DegenerateDistribution(format!(
                "floor {floor} has weight {w}"
            )));
        }
        if dist.sum() <= 0.0 {
            return Err(GenError::DegenerateDistribution("zero total mass".into()));
        }

        let weights = dist.normalize().weights().to_vec();
        let index = WeightedIndex::new(&weights)
            .map_err(|e| GenError::DegenerateDistribution(e.to_string()))?;
        Ok(Self { index, weights })
    }

    /// One weighted draw.
    #[inline]
    pub fn sample(&self, rng: &mut SimRng) -> FloorId {
        // Indices come from a Vec sized by FloorLayout, whose floor count is a u32.
        FloorId(self.index.sample(rng.inner()) as u32)
    }

    /// Normalized weight of `floor`.
    pub fn weight(&self, floor: FloorId) -> f64 {
        self.weights.get(floor.index()).copied().unwrap_or(0.0)
    }

    /// Total normalized weight of every floor except `floor`.
    pub fn mass_excluding(&self, floor: FloorId) -> f64 {
        self.weights
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != floor.index())
            .map(|(_, w)| w)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

// ── CallSampler ───────────────────────────────────────────────────────────────

/// Samples `(next_floor, demand_floor)` pairs with distinct floors.
#[derive(Clone, Debug)]
pub struct CallSampler {
    next:         FloorSampler,
    demand:       FloorSampler,
    max_attempts: u32,
    /// Demand draws rejected because they hit the excluded floor.
    resamples:    u64,
}

impl CallSampler {
    pub fn new(model: &WeightModel, max_attempts: u32) -> GenResult<Self> {
        if max_attempts == 0 {
            return Err(GenError::Config(
                "max_demand_attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            next:         FloorSampler::new(&model.rank)?,
            demand:       FloorSampler::new(&model.demand)?,
            max_attempts,
            resamples:    0,
        })
    }

    #[inline]
    pub fn sample_next_floor(&self, rng: &mut SimRng) -> FloorId {
        self.next.sample(rng)
    }

    /// Draw from the demand distribution until the result differs from
    /// `excluding`.
    ///
    /// Returns `DegenerateDistribution` up front when no other floor has any
    /// demand mass, and `SamplingExhausted` after `max_attempts` draws.
    pub fn sample_demand_floor(
        &mut self,
        rng:       &mut SimRng,
        excluding: FloorId,
    ) -> GenResult<FloorId> {
        if self.demand.mass_excluding(excluding) <= 0.0 {
            return Err(GenError::DegenerateDistribution(format!(
                "demand distribution has no mass outside floor {excluding}"
            )));
        }

        for attempt in 1..=self.max_attempts {
            let floor = self.demand.sample(rng);
            if floor != excluding {
                if attempt > 1 && attempt > self.max_attempts / 2 {
                    warn!(attempt, max = self.max_attempts, %excluding, "demand floor accepted late");
                }
                return Ok(floor);
            }
            self.resamples += 1;
        }
        Err(GenError::SamplingExhausted { excluded: excluding, attempts: self.max_attempts })
    }

    /// One `(next_floor, demand_floor)` pair.
    pub fn sample_pair(&mut self, rng: &mut SimRng) -> GenResult<(FloorId, FloorId)> {
        let next = self.sample_next_floor(rng);
        let demand = self.sample_demand_floor(rng, next)?;
        Ok((next, demand))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Rejected demand draws since construction.
    pub fn resamples(&self) -> u64 {
        self.resamples
    }
}

//! Per-floor population and average age.
//!
//! Stored indexed by floor index, special floors included.  Ground and garage
//! always hold `(0, 0)`: their probability mass comes from the business rules,
//! never from demographics.

use std::ops::Range;

use lift_core::{FloorLayout, SimRng};

use crate::{ModelError, ModelResult};

/// Demographics of one floor.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FloorStats {
    pub population: u32,
    pub avg_age:    f64,
}

impl FloorStats {
    /// Placeholder carried by ground and garage floors.
    pub const EMPTY: FloorStats = FloorStats { population: 0, avg_age: 0.0 };
}

/// Half-open sampling ranges for [`FloorDemographics::generate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemographicRanges {
    /// People per floor, `[min, max)`.  Default `[1, 10)`.
    pub population: Range<u32>,
    /// Average age per floor, `[min, max)`.  Default `[18, 90)`.
    pub avg_age:    Range<u32>,
}

impl Default for DemographicRanges {
    fn default() -> Self {
        Self { population: 1..10, avg_age: 18..90 }
    }
}

impl DemographicRanges {
    pub fn validate(&self) -> ModelResult<()> {
        for (what, range) in [("population", &self.population), ("average age", &self.avg_age)] {
            if range.is_empty() {
                return Err(ModelError::EmptyRange { what, min: range.start, max: range.end });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloorDemographics {
    layout: FloorLayout,
    floors: Vec<FloorStats>,
}

impl FloorDemographics {
    /// Draw `layout.total_floors` uniform samples for population, then as many
    /// for average age, and prepend the special-floor placeholders.
    pub fn generate(
        layout: FloorLayout,
        ranges: &DemographicRanges,
        rng:    &mut SimRng,
    ) -> ModelResult<Self> {
        ranges.validate()?;
        let n = layout.total_floors as usize;

        let populations: Vec<u32> = (0..n)
            .map(|_| rng.gen_range(ranges.population.clone()))
            .collect();
        let ages: Vec<f64> = (0..n)
            .map(|_| rng.gen_range(ranges.avg_age.clone()) as f64)
            .collect();

        Self::from_regular(layout, &populations, &ages)
    }

    /// Build from regular-floor samples only; special floors are prepended.
    pub fn from_regular(
        layout:      FloorLayout,
        populations: &[u32],
        ages:        &[f64],
    ) -> ModelResult<Self> {
        let expected = layout.total_floors as usize;
        for (what, got) in [("populations", populations.len()), ("ages", ages.len())] {
            if got != expected {
                return Err(ModelError::FloorCountMismatch { expected, got, what });
            }
        }

        let mut floors = vec![FloorStats::EMPTY; layout.extra_floors()];
        floors.extend(
            populations
                .iter()
                .zip(ages)
                .map(|(&population, &avg_age)| FloorStats { population, avg_age }),
        );
        Self::from_floors(layout, floors)
    }

    /// Build from a full per-index vector, special floors included.
    pub fn from_floors(layout: FloorLayout, floors: Vec<FloorStats>) -> ModelResult<Self> {
        if floors.len() != layout.len() {
            return Err(ModelError::FloorCountMismatch {
                expected: layout.len(),
                got:      floors.len(),
                what:     "floor demographics",
            });
        }
        for (floor, stats) in floors.iter().enumerate() {
            if layout.is_special(floor) && *stats != FloorStats::EMPTY {
                return Err(ModelError::SpecialFloorNotEmpty {
                    floor,
                    population: stats.population,
                    avg_age:    stats.avg_age,
                });
            }
            if !stats.avg_age.is_finite() || stats.avg_age < 0.0 {
                return Err(ModelError::InvalidAge { floor, avg_age: stats.avg_age });
            }
        }
        Ok(Self { layout, floors })
    }

    #[inline]
    pub fn layout(&self) -> FloorLayout {
        self.layout
    }

    #[inline]
    pub fn floors(&self) -> &[FloorStats] {
        &self.floors
    }

    pub fn populations(&self) -> Vec<u32> {
        self.floors.iter().map(|f| f.population).collect()
    }

    pub fn ages(&self) -> Vec<f64> {
        self.floors.iter().map(|f| f.avg_age).collect()
    }

    pub fn total_population(&self) -> u64 {
        self.floors.iter().map(|f| f.population as u64).sum()
    }
}

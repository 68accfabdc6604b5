//! Building floor layout.
//!
//! ```text
//! index:  0        1         2 ..................... N-1
//!         ground   garage?   regular floors (total_floors of them)
//! ```
//!
//! `extra_floors` is 1 (ground) plus 1 when a garage is configured.  Special
//! floors carry business-rule weight; regular floors carry demographic weight.

use std::ops::Range;

use crate::{BusinessRules, FloorId, LiftError, LiftResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FloorLayout {
    /// Number of regular (residential) floors.
    pub total_floors: u32,
    pub has_garage:   bool,
}

impl FloorLayout {
    pub fn new(total_floors: u32, has_garage: bool) -> LiftResult<Self> {
        if total_floors == 0 {
            return Err(LiftError::Config(
                "total_floor must be at least 1".to_string(),
            ));
        }
        Ok(Self { total_floors, has_garage })
    }

    /// Layout whose garage presence follows the rules (`weight_garage > 0`).
    pub fn from_rules(total_floors: u32, rules: &BusinessRules) -> LiftResult<Self> {
        Self::new(total_floors, rules.has_garage())
    }

    /// Ground floor, plus the garage if present.
    #[inline]
    pub fn extra_floors(&self) -> usize {
        1 + self.has_garage as usize
    }

    /// Total number of floor indices, `N = total_floors + extra_floors`.
    #[inline]
    pub fn len(&self) -> usize {
        self.total_floors as usize + self.extra_floors()
    }

    /// Never true for a validated layout; provided for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index range of the regular floors.
    #[inline]
    pub fn regular(&self) -> Range<usize> {
        self.extra_floors()..self.len()
    }

    #[inline]
    pub fn is_special(&self, index: usize) -> bool {
        index < self.extra_floors()
    }

    #[inline]
    pub fn ground(&self) -> FloorId {
        FloorId::GROUND
    }

    #[inline]
    pub fn garage(&self) -> Option<FloorId> {
        self.has_garage.then_some(FloorId(1))
    }
}

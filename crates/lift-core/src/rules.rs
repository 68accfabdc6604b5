//! Business rules — the weight coefficients and thresholds of the demand model.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "weight_garage":    0.1,
//!   "weight_ground":    0.3,
//!   "old_people_limit": 65,
//!   "weight_young":     0.7,
//!   "weight_floor":     0.4,
//!   "weight_people":    0.4,
//!   "weight_age":       0.2
//! }
//! ```
//!
//! The legacy keys `weight_garage_1` and `weight_floot_0` are accepted as
//! aliases of `weight_garage` and `weight_ground`.  Every field is required.
//!
//! A `BusinessRules` value obtained from any constructor in this module has
//! already been validated; there is no way to hold an invalid one.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{LiftError, LiftResult};

/// Sums may exceed 1 by this much before being rejected, so that
/// `0.1 + 0.2 + 0.7` style inputs are not refused over the last ulp.
const SUM_TOLERANCE: f64 = 1e-9;

/// Immutable model configuration.  Loaded once per run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BusinessRules {
    /// Probability mass reserved for the garage floor (index 1).  `0` means
    /// the building has no garage.
    #[serde(alias = "weight_garage_1")]
    pub weight_garage: f64,

    /// Probability mass reserved for the ground floor (index 0).
    #[serde(alias = "weight_floot_0")]
    pub weight_ground: f64,

    /// Average age at or above which a floor counts as "old".
    pub old_people_limit: f64,

    /// Share of the age signal moved from old floors to young floors.
    pub weight_young: f64,

    /// Coefficient of the floor-rank distribution in the demand blend.
    pub weight_floor: f64,

    /// Coefficient of the population distribution in the demand blend.
    pub weight_people: f64,

    /// Coefficient of the age distribution in the demand blend.
    pub weight_age: f64,
}

impl BusinessRules {
    /// Read and validate rules from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> LiftResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            LiftError::Config(format!(
                "cannot read business rules file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate rules from a JSON document.
    pub fn from_json_str(text: &str) -> LiftResult<Self> {
        let rules: BusinessRules = serde_json::from_str(text)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Check every field and the three sum invariants.
    ///
    /// The error message names the offending field or combination.
    pub fn validate(&self) -> LiftResult<()> {
        let fractions = [
            ("weight_garage", self.weight_garage),
            ("weight_ground", self.weight_ground),
            ("weight_young", self.weight_young),
            ("weight_floor", self.weight_floor),
            ("weight_people", self.weight_people),
            ("weight_age", self.weight_age),
        ];
        for (name, value) in fractions {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(LiftError::Config(format!(
                    "{name} = {value} must be a fraction in [0, 1]"
                )));
            }
        }

        if !self.old_people_limit.is_finite() || self.old_people_limit < 0.0 {
            return Err(LiftError::Config(format!(
                "old_people_limit = {} must be a non-negative age",
                self.old_people_limit
            )));
        }

        let special = self.weight_garage + self.weight_ground;
        if special > 1.0 + SUM_TOLERANCE {
            return Err(LiftError::Config(format!(
                "weight_garage + weight_ground = {special} must be lower or equal than 1"
            )));
        }

        let blend = self.weight_floor + self.weight_people + self.weight_age;
        if blend > 1.0 + SUM_TOLERANCE {
            return Err(LiftError::Config(format!(
                "weight_floor + weight_people + weight_age = {blend} must be lower or equal than 1"
            )));
        }

        Ok(())
    }

    /// `true` when a garage floor is configured (`weight_garage > 0`).
    #[inline]
    pub fn has_garage(&self) -> bool {
        self.weight_garage > 0.0
    }
}

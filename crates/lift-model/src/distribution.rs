//! Per-floor probability vectors.

use std::fmt;

use lift_core::{FloorId, FloorLayout};

/// Ordered non-negative weights, one per floor index.
///
/// Builders aim for a sum of 1 but may miss it slightly (rounding, degenerate
/// fallbacks).  [`normalize`](Self::normalize) and
/// [`correct_residual`](Self::correct_residual) are the two repair steps; both
/// are pure and return a new vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution(Vec<f64>);

impl Distribution {
    pub fn new(weights: Vec<f64>) -> Self {
        Distribution(weights)
    }

    /// All-zero vector of `len` entries.
    pub fn zeros(len: usize) -> Self {
        Distribution(vec![0.0; len])
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Weight of `floor`; 0 for indices outside the vector.
    #[inline]
    pub fn get(&self, floor: FloorId) -> f64 {
        self.0.get(floor.index()).copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Proportional renormalization so the weights sum to 1.
    ///
    /// A vector with no positive mass is returned unchanged; sampling rejects
    /// it later.
    pub fn normalize(&self) -> Distribution {
        Distribution(normalize(&self.0))
    }

    /// Spread the residual `ε = 1 - sum` evenly over the regular floors,
    /// leaving the special floors untouched.
    pub fn correct_residual(&self, layout: &FloorLayout) -> Distribution {
        let residual = 1.0 - self.sum();
        let mut weights = self.0.clone();
        if residual != 0.0 {
            let share = residual / layout.total_floors as f64;
            for w in weights.iter_mut().skip(layout.extra_floors()) {
                *w += share;
            }
        }
        Distribution(weights)
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, w) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{w:.4}")?;
        }
        write!(f, "]")
    }
}

/// Scale `weights` to sum to 1.  Inputs without positive finite mass come back
/// as-is.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return weights.to_vec();
    }
    weights.iter().map(|w| w / total).collect()
}

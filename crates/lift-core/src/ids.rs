//! Strongly typed, zero-cost identifier wrappers.
//!
//! The inner integer is `pub` so floor indices can be used directly against
//! the per-floor `Vec`s of the weight model, but callers should prefer the
//! `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a floor in `[0, FloorLayout::len())`.  Index 0 is the ground
    /// floor; index 1 is the garage when the building has one.
    pub struct FloorId(u32);
}

typed_id! {
    /// Row id of a persisted call, assigned by the store on insert.
    pub struct CallId(i64);
}

impl FloorId {
    pub const GROUND: FloorId = FloorId(0);
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{what} range [{min}, {max}) is empty")]
    EmptyRange {
        what: &'static str,
        min:  u32,
        max:  u32,
    },

    #[error("{what} length {got} does not match floor count {expected}")]
    FloorCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("special floor {floor} must carry (0, 0) demographics, got ({population}, {avg_age})")]
    SpecialFloorNotEmpty {
        floor:      usize,
        population: u32,
        avg_age:    f64,
    },

    #[error("floor {floor} has invalid average age {avg_age}")]
    InvalidAge { floor: usize, avg_age: f64 },
}

pub type ModelResult<T> = Result<T, ModelError>;

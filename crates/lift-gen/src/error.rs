use lift_core::{FloorId, LiftError};
use lift_model::ModelError;
use lift_output::OutputError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("generator configuration error: {0}")]
    Config(String),

    #[error("distribution cannot be sampled: {0}")]
    DegenerateDistribution(String),

    #[error("no demand floor other than {excluded} drawn in {attempts} attempts")]
    SamplingExhausted { excluded: FloorId, attempts: u32 },

    #[error(transparent)]
    Core(#[from] LiftError),

    #[error("demand model error: {0}")]
    Model(#[from] ModelError),

    #[error("sink error: {0}")]
    Sink(#[from] OutputError),
}

pub type GenResult<T> = Result<T, GenError>;

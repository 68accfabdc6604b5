//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `LiftError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `lift-core`.
#[derive(Debug, Error)]
pub enum LiftError {
    /// Invalid business rules or generator parameters.  Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid call record: {0}")]
    InvalidRecord(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Shorthand result type for `lift-core`.
pub type LiftResult<T> = Result<T, LiftError>;

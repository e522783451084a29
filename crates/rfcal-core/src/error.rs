//! Calibration error taxonomy
//!
//! All failures are detected eagerly at each component boundary and carry the
//! offending frequency index where one exists. A failed solve never returns a
//! partially populated model.

use thiserror::Error;

/// Calibration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalError {
    #[error("frequency grids do not match")]
    GridMismatch,

    #[error("degenerate calibration standards at frequency index {index}")]
    DegenerateStandards { index: usize },

    #[error("non-finite standard response at frequency index {index}")]
    CorruptedStandard { index: usize },

    #[error("denominator magnitude {magnitude:e} below tolerance at frequency index {index}")]
    OutOfRange { index: usize, magnitude: f64 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, CalError>;

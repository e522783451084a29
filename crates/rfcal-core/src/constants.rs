//! Numerical constants for calibration calculations
//!
//! Provides standardized tolerance values used throughout the library.

/// Tolerance for detecting near-zero values in division guards.
/// Used in the correction denominator check.
pub const NEAR_ZERO: f64 = 1e-15;

/// Tolerance on the embedding denominator |1 - S22*Gt|.
/// Any passive termination behind a reciprocal line keeps this well above zero.
pub const EMBED_TOL: f64 = 1e-12;

/// Determinant-magnitude threshold for the 3x3 error-term solve.
/// All matrix entries are O(1) for passive standards, so an absolute
/// threshold detects collinear/degenerate ideal triples.
pub const DEGENERATE_TOL: f64 = 1e-10;

/// Reference frequency for the skin-effect loss normalization (1 GHz).
/// Vendor offset_loss coefficients are specified at this frequency.
pub const LOSS_REF_FREQ_HZ: f64 = 1e9;

//! Calibration module - one-port SOL error-term solve and correction
//!
//! Solves the classical 3-term error model (directivity e00, source match
//! e11, reflection tracking) from short/open/load standards, and applies its
//! inverse to raw measurements.

mod one_port;

pub use one_port::{solve_with_kit, CalSession, ErrorModel, OnePortSol};

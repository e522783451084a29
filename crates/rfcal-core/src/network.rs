//! Network module - one-/two-port complex network representation
//!
//! Holds frequency-indexed S-parameter data and the two-port-terminated-by-
//! one-port embedding reduction used to place a termination behind an offset
//! line. Embedding is not generic matrix multiplication of one-ports; it is
//! the signal-flow reduction
//! `Gamma = S11 + S12*S21*Gt / (1 - S22*Gt)` applied per frequency.

use ndarray::{Array1, Array3};
use num_complex::Complex64;

use crate::constants::EMBED_TOL;
use crate::error::{CalError, Result};
use crate::frequency::Frequency;

/// A one- or two-port electrical network
#[derive(Debug, Clone)]
pub struct Network {
    /// Frequency data
    pub frequency: Frequency,
    /// S-parameter data [nfreq, nports, nports]
    pub s: Array3<Complex64>,
    /// Reference impedance (per port)
    pub z0: Array1<Complex64>,
    /// Network name
    pub name: Option<String>,
}

impl Network {
    /// Create a new Network from S-parameters
    pub fn new(frequency: Frequency, s: Array3<Complex64>, z0: Array1<Complex64>) -> Self {
        Self {
            frequency,
            s,
            z0,
            name: None,
        }
    }

    /// Create a one-port network from a reflection-coefficient vector
    pub fn one_port(frequency: Frequency, gamma: Array1<Complex64>, z0: f64) -> Self {
        let nfreq = gamma.len();
        let s = Array3::from_shape_fn((nfreq, 1, 1), |(f, _, _)| gamma[f]);
        Self::new(frequency, s, Array1::from_elem(1, Complex64::new(z0, 0.0)))
    }

    /// Create an ideal matched pass-through two-port (S11=S22=0, S21=S12=1)
    pub fn two_port_identity(frequency: Frequency, z0: f64) -> Self {
        let nfreq = frequency.npoints();
        let mut s = Array3::<Complex64>::zeros((nfreq, 2, 2));
        for f in 0..nfreq {
            s[[f, 0, 1]] = Complex64::new(1.0, 0.0);
            s[[f, 1, 0]] = Complex64::new(1.0, 0.0);
        }
        Self::new(frequency, s, Array1::from_elem(2, Complex64::new(z0, 0.0)))
    }

    /// Get the number of ports
    #[inline]
    pub fn nports(&self) -> usize {
        self.s.shape()[1]
    }

    /// Get the number of frequency points
    #[inline]
    pub fn nfreq(&self) -> usize {
        self.s.shape()[0]
    }

    /// Reflection coefficient at port 1 for frequency index `f`
    #[inline]
    pub fn s11(&self, f: usize) -> Complex64 {
        self.s[[f, 0, 0]]
    }

    /// True if `other` lives on the identical frequency grid
    pub fn same_grid(&self, other: &Network) -> bool {
        self.frequency == other.frequency
    }

    /// First frequency index holding a non-finite S-parameter, if any
    pub fn first_nonfinite(&self) -> Option<usize> {
        let (nfreq, nports) = (self.nfreq(), self.nports());
        for f in 0..nfreq {
            for i in 0..nports {
                for j in 0..nports {
                    if !self.s[[f, i, j]].is_finite() {
                        return Some(f);
                    }
                }
            }
        }
        None
    }

    /// Embed a one-port termination behind this two-port.
    ///
    /// Returns the one-port seen at port 1 when `load` is attached at port 2:
    /// `Gamma(f) = S11 + S12*S21*Gt / (1 - S22*Gt)`.
    ///
    /// For any passive termination behind a reciprocal passive line the
    /// denominator satisfies |S22*Gt| < 1; a numerically vanishing
    /// denominator is rejected rather than divided through.
    pub fn terminate(&self, load: &Network) -> Result<Network> {
        if self.nports() != 2 {
            return Err(CalError::InvalidParameter(
                "terminate requires a two-port network".to_string(),
            ));
        }
        if load.nports() != 1 {
            return Err(CalError::InvalidParameter(
                "termination must be a one-port network".to_string(),
            ));
        }
        if !self.same_grid(load) {
            return Err(CalError::GridMismatch);
        }

        let nfreq = self.nfreq();
        let mut gamma = Array1::<Complex64>::zeros(nfreq);
        for f in 0..nfreq {
            let s11 = self.s[[f, 0, 0]];
            let s12 = self.s[[f, 0, 1]];
            let s21 = self.s[[f, 1, 0]];
            let s22 = self.s[[f, 1, 1]];
            let gt = load.s11(f);

            let den = Complex64::new(1.0, 0.0) - s22 * gt;
            if den.norm() < EMBED_TOL {
                return Err(CalError::OutOfRange {
                    index: f,
                    magnitude: den.norm(),
                });
            }
            gamma[f] = s11 + s12 * s21 * gt / den;
        }

        Ok(Network::one_port(
            self.frequency.clone(),
            gamma,
            self.z0[0].re,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{FrequencyUnit, SweepType};
    use approx::assert_relative_eq;

    fn grid(npoints: usize) -> Frequency {
        Frequency::new(1.0, 10.0, npoints, FrequencyUnit::GHz, SweepType::Linear)
    }

    #[test]
    fn test_network_creation() {
        let freq = grid(10);
        let s = Array3::<Complex64>::zeros((10, 2, 2));
        let z0 = Array1::from_elem(2, Complex64::new(50.0, 0.0));
        let ntwk = Network::new(freq, s, z0);

        assert_eq!(ntwk.nports(), 2);
        assert_eq!(ntwk.nfreq(), 10);
        assert_eq!(ntwk.z0[0].re, 50.0);
    }

    #[test]
    fn test_identity_terminate_passes_load_through() {
        let freq = grid(5);
        let line = Network::two_port_identity(freq.clone(), 50.0);
        let gt = Complex64::new(0.3, -0.4);
        let load = Network::one_port(freq, Array1::from_elem(5, gt), 50.0);

        let seen = line.terminate(&load).unwrap();
        assert_eq!(seen.nports(), 1);
        for f in 0..5 {
            assert_relative_eq!(seen.s11(f).re, gt.re, epsilon = 1e-15);
            assert_relative_eq!(seen.s11(f).im, gt.im, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_terminate_rejects_grid_mismatch() {
        let line = Network::two_port_identity(grid(5), 50.0);
        let load = Network::one_port(grid(6), Array1::zeros(6), 50.0);
        assert!(matches!(
            line.terminate(&load),
            Err(CalError::GridMismatch)
        ));
    }

    #[test]
    fn test_terminate_rejects_singular_denominator() {
        let freq = grid(1);
        let mut s = Array3::<Complex64>::zeros((1, 2, 2));
        s[[0, 1, 1]] = Complex64::new(1.0, 0.0); // non-physical: |S22| = 1
        let line = Network::new(freq.clone(), s, Array1::from_elem(2, Complex64::new(50.0, 0.0)));
        let load = Network::one_port(freq, Array1::from_elem(1, Complex64::new(1.0, 0.0)), 50.0);

        match line.terminate(&load) {
            Err(CalError::OutOfRange { index: 0, .. }) => {}
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_first_nonfinite() {
        let freq = grid(3);
        let mut gamma = Array1::<Complex64>::zeros(3);
        gamma[1] = Complex64::new(f64::NAN, 0.0);
        let n = Network::one_port(freq, gamma, 50.0);
        assert_eq!(n.first_nonfinite(), Some(1));
    }
}

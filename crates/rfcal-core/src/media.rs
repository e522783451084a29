//! Offset-line model for coaxial calibration standards
//!
//! Computes, per frequency, the complex characteristic impedance and
//! propagation constant of the lossy coaxial offset inside a standard, and
//! produces its two-port S-parameters referenced to the real port impedance.
//!
//! The loss term follows the vendor skin-effect convention: attenuation
//! scales with sqrt(f/1 GHz) and is folded additively into the phase term.
//! This coupling is part of the published standard definitions and must not
//! be "corrected".

use ndarray::{Array1, Array3};
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::constants::LOSS_REF_FREQ_HZ;
use crate::error::{CalError, Result};
use crate::frequency::Frequency;
use crate::network::Network;

/// Physical parameters of a calibration-standard offset line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetLineParams {
    /// One-way delay in seconds
    pub delay: f64,
    /// Skin-effect loss coefficient in ohm/s (specified at 1 GHz)
    pub loss: f64,
    /// Nominal line impedance in ohms
    pub z0: f64,
    /// Port reference impedance in ohms
    pub port_z0: f64,
}

impl Default for OffsetLineParams {
    /// Zero-length lossless 50-ohm line
    fn default() -> Self {
        Self {
            delay: 0.0,
            loss: 0.0,
            z0: 50.0,
            port_z0: 50.0,
        }
    }
}

impl OffsetLineParams {
    pub fn new(delay: f64, loss: f64, z0: f64, port_z0: f64) -> Self {
        Self {
            delay,
            loss,
            z0,
            port_z0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(CalError::InvalidParameter(format!(
                "offset delay must be finite and non-negative, got {}",
                self.delay
            )));
        }
        if !self.loss.is_finite() || self.loss < 0.0 {
            return Err(CalError::InvalidParameter(format!(
                "offset loss must be finite and non-negative, got {}",
                self.loss
            )));
        }
        if !(self.z0.is_finite() && self.z0 > 0.0) {
            return Err(CalError::InvalidParameter(format!(
                "line impedance must be positive, got {}",
                self.z0
            )));
        }
        if !(self.port_z0.is_finite() && self.port_z0 > 0.0) {
            return Err(CalError::InvalidParameter(format!(
                "port impedance must be positive, got {}",
                self.port_z0
            )));
        }
        Ok(())
    }

    /// True if the line degenerates to an ideal zero-length matched line
    #[inline]
    pub fn is_zero_length(&self) -> bool {
        self.delay == 0.0 && self.loss == 0.0
    }
}

/// Build the two-port response of an offset line on the given grid.
///
/// With zero delay and zero loss the line is the identity pass-through.
/// Otherwise, per frequency f:
///
/// ```text
/// alpha_l = (loss * delay) / (2 * z0) * sqrt(f / 1 GHz)   (0 when delay = 0)
/// beta_l  = 2*pi*f*delay + alpha_l
/// zc      = z0 + (1 - j) * (loss / (4*pi*f)) * sqrt(f / 1 GHz)
/// gamma_l = alpha_l + j*beta_l
/// ```
///
/// and the S-parameters follow from the ABCD matrix of a unit-length line
/// with constants (zc, gamma_l), referenced to the real `port_z0`. The
/// reference impedance is the port impedance, never zc.
pub fn offset_line(freq: &Frequency, params: &OffsetLineParams) -> Result<Network> {
    params.validate()?;

    if params.is_zero_length() {
        return Ok(Network::two_port_identity(freq.clone(), params.port_z0));
    }

    let nfreq = freq.npoints();
    let mut s = Array3::<Complex64>::zeros((nfreq, 2, 2));
    let zp = Complex64::new(params.port_z0, 0.0);

    for (i, &f) in freq.f().iter().enumerate() {
        if f <= 0.0 {
            return Err(CalError::InvalidParameter(format!(
                "lossy offset line requires positive frequency, got {} Hz at index {}",
                f, i
            )));
        }
        let root = (f / LOSS_REF_FREQ_HZ).sqrt();

        // Loss requires nonzero delay in this model.
        let alpha_l = if params.delay > 0.0 {
            (params.loss * params.delay) / (2.0 * params.z0) * root
        } else {
            0.0
        };
        let beta_l = 2.0 * PI * f * params.delay + alpha_l;
        let zc_skin = (params.loss / (4.0 * PI * f)) * root;
        let zc = Complex64::new(params.z0 + zc_skin, -zc_skin);
        let gamma_l = Complex64::new(alpha_l, beta_l);

        // ABCD of a unit-length line, then ABCD -> S at the port impedance
        let sh = gamma_l.sinh();
        let a = gamma_l.cosh();
        let b = zc * sh;
        let c = sh / zc;
        let d = a;

        let den = a + b / zp + c * zp + d;
        s[[i, 0, 0]] = (a + b / zp - c * zp - d) / den;
        s[[i, 0, 1]] = (a * d - b * c) * 2.0 / den;
        s[[i, 1, 0]] = Complex64::new(2.0, 0.0) / den;
        s[[i, 1, 1]] = (-a + b / zp - c * zp + d) / den;
    }

    Ok(Network::new(
        freq.clone(),
        s,
        Array1::from_elem(2, zp),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{FrequencyUnit, SweepType};
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_length_line_is_identity() {
        let freq = Frequency::new(1.0, 10.0, 5, FrequencyUnit::GHz, SweepType::Linear);
        let line = offset_line(&freq, &OffsetLineParams::default()).unwrap();
        for f in 0..5 {
            assert_eq!(line.s[[f, 0, 0]], Complex64::new(0.0, 0.0));
            assert_eq!(line.s[[f, 1, 0]], Complex64::new(1.0, 0.0));
            assert_eq!(line.s[[f, 0, 1]], Complex64::new(1.0, 0.0));
            assert_eq!(line.s[[f, 1, 1]], Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_lossless_line_is_pure_phase() {
        let freq = Frequency::new(1.0, 1.0, 1, FrequencyUnit::GHz, SweepType::Linear);
        let params = OffsetLineParams::new(100e-12, 0.0, 50.0, 50.0);
        let line = offset_line(&freq, &params).unwrap();

        // Matched lossless line: S11 = 0, |S21| = 1, arg(S21) = -beta_l
        let beta_l = 2.0 * PI * 1e9 * 100e-12;
        assert_relative_eq!(line.s[[0, 0, 0]].norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(line.s[[0, 1, 0]].norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(line.s[[0, 1, 0]].arg(), -beta_l, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_delay_with_loss_has_no_attenuation() {
        // loss > 0 with delay = 0 must not attenuate or divide by zero
        let freq = Frequency::new(1.0, 1.0, 1, FrequencyUnit::GHz, SweepType::Linear);
        let params = OffsetLineParams::new(0.0, 3.554e9, 50.0, 50.0);
        let line = offset_line(&freq, &params).unwrap();

        // gamma_l = 0: transparent line regardless of zc
        assert_relative_eq!(line.s[[0, 1, 0]].re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(line.s[[0, 1, 0]].im, 0.0, epsilon = 1e-12);
        assert_relative_eq!(line.s[[0, 0, 0]].norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lossy_line_golden_sparams() {
        // Keysight 85056D short offset at 1 GHz; values fixed by the
        // alpha/beta/zc formulas above
        let freq = Frequency::new(1.0, 1.0, 1, FrequencyUnit::GHz, SweepType::Linear);
        let params = OffsetLineParams::new(22.548e-12, 3.554e9, 50.0, 50.0);
        let line = offset_line(&freq, &params).unwrap();

        let s11 = line.s[[0, 0, 0]];
        let s21 = line.s[[0, 1, 0]];
        assert_relative_eq!(s11.re, 9.076716389581547e-4, epsilon = 1e-12);
        assert_relative_eq!(s11.im, 6.760018057555976e-4, epsilon = 1e-12);
        assert_relative_eq!(s21.re, 9.890704017992598e-1, epsilon = 1e-12);
        assert_relative_eq!(s21.im, -1.418780823226000e-1, epsilon = 1e-12);

        // Loss makes the line mismatched: referencing to zc instead of the
        // port impedance would wrongly zero S11
        assert!(s11.norm() > 1e-4);

        // Reciprocity and symmetry
        assert_relative_eq!(line.s[[0, 0, 1]].re, line.s[[0, 1, 0]].re, epsilon = 1e-12);
        assert_relative_eq!(line.s[[0, 0, 1]].im, line.s[[0, 1, 0]].im, epsilon = 1e-12);
        assert_relative_eq!(line.s[[0, 1, 1]].re, s11.re, epsilon = 1e-15);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let freq = Frequency::new(1.0, 1.0, 1, FrequencyUnit::GHz, SweepType::Linear);
        assert!(offset_line(&freq, &OffsetLineParams::new(-1e-12, 0.0, 50.0, 50.0)).is_err());
        assert!(offset_line(&freq, &OffsetLineParams::new(0.0, -1.0, 50.0, 50.0)).is_err());
        assert!(offset_line(&freq, &OffsetLineParams::new(0.0, 0.0, 0.0, 50.0)).is_err());
    }
}

//! Termination models and calibration-standard synthesis
//!
//! A calibration standard is an offset line terminated by an ideal reactive
//! or matched element. Vendor kits describe the reactive terminations as
//! cubic polynomials over absolute frequency: C(f) in farads for opens,
//! L(f) in henries for shorts, coefficients in increasing-degree order.

use ndarray::Array1;
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::{CalError, Result};
use crate::frequency::Frequency;
use crate::media::{offset_line, OffsetLineParams};
use crate::network::Network;

/// Termination archetypes of a calibration kit.
///
/// A closed set: vendor kits define exactly these four, so no open-ended
/// extension point exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminationSpec {
    /// Frequency-dependent fringing capacitance, C(f) = c0 + c1*f + c2*f^2 + c3*f^3 (F)
    Open { c0: f64, c1: f64, c2: f64, c3: f64 },
    /// Frequency-dependent series inductance, L(f) = l0 + l1*f + l2*f^2 + l3*f^3 (H)
    Short { l0: f64, l1: f64, l2: f64, l3: f64 },
    /// Matched termination, Gamma = 0
    Load,
    /// Matched pass-through two-port; catalog completeness only, unused by
    /// the one-port solve
    Thru,
}

impl TerminationSpec {
    /// An open with no fringing capacitance (Gamma = +1 exactly)
    pub const IDEAL_OPEN: TerminationSpec = TerminationSpec::Open {
        c0: 0.0,
        c1: 0.0,
        c2: 0.0,
        c3: 0.0,
    };

    /// A short with no series inductance (Gamma = -1 exactly)
    pub const IDEAL_SHORT: TerminationSpec = TerminationSpec::Short {
        l0: 0.0,
        l1: 0.0,
        l2: 0.0,
        l3: 0.0,
    };

    fn validate(&self) -> Result<()> {
        let coeffs = match self {
            TerminationSpec::Open { c0, c1, c2, c3 } => [*c0, *c1, *c2, *c3],
            TerminationSpec::Short { l0, l1, l2, l3 } => [*l0, *l1, *l2, *l3],
            TerminationSpec::Load | TerminationSpec::Thru => return Ok(()),
        };
        if coeffs.iter().any(|c| !c.is_finite()) {
            return Err(CalError::InvalidParameter(
                "termination polynomial coefficient is not finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Increasing-degree cubic, Horner form
#[inline]
fn cubic(f: f64, k0: f64, k1: f64, k2: f64, k3: f64) -> f64 {
    k0 + f * (k1 + f * (k2 + f * k3))
}

/// Build the ideal one-port response of a termination on the given grid.
///
/// Reactive terminations are referenced to `port_z0`, never to the lossy
/// line's own characteristic impedance. All-zero polynomial coefficients
/// signal an ideal termination and yield exactly +1 (open) or -1 (short).
///
/// `Thru` produces the matched pass-through two-port; it is a termination
/// target only when composing thru standards.
pub fn termination(freq: &Frequency, spec: &TerminationSpec, port_z0: f64) -> Result<Network> {
    spec.validate()?;
    if !(port_z0.is_finite() && port_z0 > 0.0) {
        return Err(CalError::InvalidParameter(format!(
            "port impedance must be positive, got {}",
            port_z0
        )));
    }

    let nfreq = freq.npoints();
    let zp = Complex64::new(port_z0, 0.0);
    let one = Complex64::new(1.0, 0.0);

    let gamma = match *spec {
        TerminationSpec::Load => Array1::<Complex64>::zeros(nfreq),
        TerminationSpec::Thru => return Ok(Network::two_port_identity(freq.clone(), port_z0)),
        TerminationSpec::Open { c0, c1, c2, c3 } => {
            if c0 == 0.0 && c1 == 0.0 && c2 == 0.0 && c3 == 0.0 {
                Array1::from_elem(nfreq, one)
            } else {
                // Shunt capacitor in parallel with an ideal open:
                // Gamma = (1 - j*w*C*zp) / (1 + j*w*C*zp)
                Array1::from_shape_fn(nfreq, |i| {
                    let f = freq.f()[i];
                    let y = Complex64::new(0.0, 2.0 * PI * f * cubic(f, c0, c1, c2, c3));
                    (one - y * zp) / (one + y * zp)
                })
            }
        }
        TerminationSpec::Short { l0, l1, l2, l3 } => {
            if l0 == 0.0 && l1 == 0.0 && l2 == 0.0 && l3 == 0.0 {
                Array1::from_elem(nfreq, -one)
            } else {
                // Series inductor into an ideal short:
                // Gamma = (j*w*L - zp) / (j*w*L + zp)
                Array1::from_shape_fn(nfreq, |i| {
                    let f = freq.f()[i];
                    let z = Complex64::new(0.0, 2.0 * PI * f * cubic(f, l0, l1, l2, l3));
                    (z - zp) / (z + zp)
                })
            }
        }
    };

    Ok(Network::one_port(freq.clone(), gamma, port_z0))
}

/// Synthesize the full ideal standard seen at the reference plane: the
/// termination embedded behind the offset line.
///
/// Open/short/load produce a one-port; thru produces the offset line itself
/// as a two-port (a matched pass-through leaves the line unchanged).
pub fn synthesize_standard(
    freq: &Frequency,
    line_params: &OffsetLineParams,
    spec: &TerminationSpec,
) -> Result<Network> {
    let line = offset_line(freq, line_params)?;
    if let TerminationSpec::Thru = spec {
        return Ok(line);
    }
    let term = termination(freq, spec, line_params.port_z0)?;
    line.terminate(&term)
}

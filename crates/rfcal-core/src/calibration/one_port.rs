//! 1-Port SOL (Short-Open-Load) calibration
//!
//! The error box relates a raw measured reflection to the true one through
//!
//! ```text
//! Gm = e00 + tr * Gs / (1 - e11 * Gs)
//! ```
//!
//! with directivity e00, source match e11 and reflection tracking tr.
//! Substituting tr' = tr - e00*e11 turns each (ideal, measured) standard
//! pair into one linear equation
//!
//! ```text
//! e00 + Gm*Gs * e11 + Gs * tr' = Gm
//! ```
//!
//! so three standards give a 3x3 complex system per frequency point. The
//! points are independent; the solve runs point by point and fails as a
//! whole (no partial model) on the first degenerate or corrupted point.

use nalgebra::{Matrix3, Vector3};
use ndarray::Array1;
use num_complex::Complex64;

use crate::constants::{DEGENERATE_TOL, NEAR_ZERO};
use crate::error::{CalError, Result};
use crate::frequency::Frequency;
use crate::kits::{sol_triple, Connector, KitId};
use crate::network::Network;
use crate::standards::synthesize_standard;

/// Solved one-port 3-term error model.
///
/// Immutable once produced; safe to share across concurrent correction
/// calls. Holds one (e00, e11, tracking) triple per frequency point of its
/// grid.
#[derive(Debug, Clone)]
pub struct ErrorModel {
    frequency: Frequency,
    e00: Array1<Complex64>,
    e11: Array1<Complex64>,
    tracking: Array1<Complex64>,
}

impl ErrorModel {
    /// Assemble a model from per-frequency term vectors (e.g. restored from
    /// a previous run). All vectors must match the grid length.
    pub fn new(
        frequency: Frequency,
        e00: Array1<Complex64>,
        e11: Array1<Complex64>,
        tracking: Array1<Complex64>,
    ) -> Result<Self> {
        let n = frequency.npoints();
        if e00.len() != n || e11.len() != n || tracking.len() != n {
            return Err(CalError::InvalidParameter(format!(
                "error-term vectors must have {} points to match the grid",
                n
            )));
        }
        Ok(Self {
            frequency,
            e00,
            e11,
            tracking,
        })
    }

    /// The identity model: e00 = 0, e11 = 0, tracking = 1. Applying it
    /// returns any measurement unchanged.
    pub fn identity(frequency: Frequency) -> Self {
        let n = frequency.npoints();
        Self {
            frequency,
            e00: Array1::zeros(n),
            e11: Array1::zeros(n),
            tracking: Array1::from_elem(n, Complex64::new(1.0, 0.0)),
        }
    }

    #[inline]
    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    /// Directivity terms
    #[inline]
    pub fn e00(&self) -> &Array1<Complex64> {
        &self.e00
    }

    /// Source-match terms
    #[inline]
    pub fn e11(&self) -> &Array1<Complex64> {
        &self.e11
    }

    /// Reflection-tracking terms (e01*e10)
    #[inline]
    pub fn tracking(&self) -> &Array1<Complex64> {
        &self.tracking
    }

    /// Apply the inverted error model to a raw one-port measurement:
    ///
    /// ```text
    /// Gs = (Gm - e00) / (tr + e11 * (Gm - e00))
    /// ```
    ///
    /// A near-zero denominator means the device response sits at or beyond
    /// the edge of the correctable range and is reported, not divided
    /// through.
    pub fn apply(&self, raw: &Network) -> Result<Network> {
        if raw.nports() != 1 {
            return Err(CalError::InvalidParameter(
                "correction applies to one-port measurements".to_string(),
            ));
        }
        if raw.frequency != self.frequency {
            return Err(CalError::GridMismatch);
        }

        let nfreq = raw.nfreq();
        let mut gamma = Array1::<Complex64>::zeros(nfreq);
        for f in 0..nfreq {
            let num = raw.s11(f) - self.e00[f];
            let den = self.tracking[f] + self.e11[f] * num;
            if den.norm() < NEAR_ZERO {
                return Err(CalError::OutOfRange {
                    index: f,
                    magnitude: den.norm(),
                });
            }
            gamma[f] = num / den;
        }

        Ok(Network::one_port(
            self.frequency.clone(),
            gamma,
            raw.z0[0].re,
        ))
    }
}

/// 1-Port SOL calibration: three measured standards and their ideal models
#[derive(Debug, Clone)]
pub struct OnePortSol {
    pub measured_short: Network,
    pub measured_open: Network,
    pub measured_load: Network,
    pub ideal_short: Network,
    pub ideal_open: Network,
    pub ideal_load: Network,
}

impl OnePortSol {
    pub fn new(
        measured_short: Network,
        measured_open: Network,
        measured_load: Network,
        ideal_short: Network,
        ideal_open: Network,
        ideal_load: Network,
    ) -> Self {
        Self {
            measured_short,
            measured_open,
            measured_load,
            ideal_short,
            ideal_open,
            ideal_load,
        }
    }

    fn pairs(&self) -> [(&Network, &Network); 3] {
        [
            (&self.ideal_short, &self.measured_short),
            (&self.ideal_open, &self.measured_open),
            (&self.ideal_load, &self.measured_load),
        ]
    }

    /// Solve for the error model.
    ///
    /// All six responses must be one-ports on the identical grid and hold
    /// only finite values; the three ideal standards must span the
    /// reflection plane (a collinear triple makes the per-frequency system
    /// singular and is rejected).
    pub fn solve(&self) -> Result<ErrorModel> {
        let grid = &self.measured_short.frequency;
        for (ideal, measured) in self.pairs() {
            if ideal.nports() != 1 || measured.nports() != 1 {
                return Err(CalError::InvalidParameter(
                    "calibration standards must be one-port networks".to_string(),
                ));
            }
            if &ideal.frequency != grid || &measured.frequency != grid {
                return Err(CalError::GridMismatch);
            }
            if let Some(index) = ideal.first_nonfinite().or(measured.first_nonfinite()) {
                return Err(CalError::CorruptedStandard { index });
            }
        }

        let nfreq = grid.npoints();
        let mut e00 = Array1::<Complex64>::zeros(nfreq);
        let mut e11 = Array1::<Complex64>::zeros(nfreq);
        let mut tracking = Array1::<Complex64>::zeros(nfreq);
        let one = Complex64::new(1.0, 0.0);

        for f in 0..nfreq {
            let [(si, sm), (oi, om), (li, lm)] =
                self.pairs().map(|(i, m)| (i.s11(f), m.s11(f)));

            // Rows [1, Gm*Gs, Gs] * [e00, e11, tr']^T = Gm per standard.
            // Entries are O(1) for passive standards, so the determinant
            // magnitude directly measures conditioning.
            let a = Matrix3::new(
                one, sm * si, si,
                one, om * oi, oi,
                one, lm * li, li,
            );
            let b = Vector3::new(sm, om, lm);

            if a.determinant().norm() < DEGENERATE_TOL {
                return Err(CalError::DegenerateStandards { index: f });
            }
            let x = a
                .lu()
                .solve(&b)
                .ok_or(CalError::DegenerateStandards { index: f })?;

            e00[f] = x[0];
            e11[f] = x[1];
            tracking[f] = x[2] + x[0] * x[1];
        }

        ErrorModel::new(grid.clone(), e00, e11, tracking)
    }
}

/// One calibration event: the standard responses it consumed and the model
/// it produced. The model may be cloned out and outlive the session for
/// repeated correction calls.
#[derive(Debug, Clone)]
pub struct CalSession {
    /// Ideal short/open/load responses
    pub ideals: [Network; 3],
    /// Measured short/open/load responses
    pub measured: [Network; 3],
    /// The solved error model
    pub model: ErrorModel,
}

impl CalSession {
    /// Solve the error model for an ideal/measured standard triple, each in
    /// short/open/load order.
    pub fn run(ideals: [Network; 3], measured: [Network; 3]) -> Result<Self> {
        let [is, io, il] = ideals;
        let [ms, mo, ml] = measured;
        let cal = OnePortSol::new(ms, mo, ml, is, io, il);
        let model = cal.solve()?;
        Ok(Self {
            ideals: [cal.ideal_short, cal.ideal_open, cal.ideal_load],
            measured: [cal.measured_short, cal.measured_open, cal.measured_load],
            model,
        })
    }

    /// Correct a raw measurement with this session's model
    pub fn correct(&self, raw: &Network) -> Result<Network> {
        self.model.apply(raw)
    }
}

/// Calibrate against a cataloged kit: synthesize the kit's ideal
/// short/open/load responses of the given connector sex on the measured
/// grid, then solve.
pub fn solve_with_kit(
    kit: KitId,
    connector: Connector,
    measured_short: Network,
    measured_open: Network,
    measured_load: Network,
) -> Result<CalSession> {
    let grid = measured_short.frequency.clone();
    let [s, o, l] = sol_triple(kit, connector)?;
    let ideals = [
        synthesize_standard(&grid, &s.line, &s.termination)?,
        synthesize_standard(&grid, &o.line, &o.termination)?,
        synthesize_standard(&grid, &l.line, &l.termination)?,
    ];
    CalSession::run(ideals, [measured_short, measured_open, measured_load])
}

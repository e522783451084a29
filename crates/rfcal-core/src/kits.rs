//! Calibration-kit coefficient catalog
//!
//! Vendor-published standard definitions as static data: one entry per
//! (kit, connector, band, standard) holding the offset-line parameters and
//! termination polynomial. Band-switched kits carry one entry per sub-band.
//!
//! Coefficients are transcribed as published. The 85058B male-short table
//! contains values with implausible magnitudes (inductance coefficients that
//! read like a missing power-of-ten exponent); these are kept verbatim and
//! flagged by [`validate`] instead of being silently corrected.

use std::fmt;

use crate::error::{CalError, Result};
use crate::media::OffsetLineParams;
use crate::standards::TerminationSpec;

/// Supported calibration-kit models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KitId {
    /// Keysight 85056D, 2.4 mm economy kit
    Keysight85056D,
    /// Keysight 85058B, 1.85 mm kit with band-switched definitions
    Keysight85058B,
}

/// Frequency sub-band a definition applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Single definition covering the whole kit range
    Broadband,
    Low,
    High,
}

/// Connector sex of the standard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    Male,
    Female,
}

/// Standard archetype within a kit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardKind {
    Short,
    Open,
    Load,
    Thru,
}

/// One catalog row: a fully parameterized standard definition
#[derive(Debug, Clone, Copy)]
pub struct StandardDef {
    pub kind: StandardKind,
    /// None for genderless standards (the thru)
    pub connector: Option<Connector>,
    pub band: Band,
    /// Numbered standards within a kit (the 85058B carries shorts 1-4)
    pub position: u8,
    pub line: OffsetLineParams,
    pub termination: TerminationSpec,
}

const NO_OFFSET: OffsetLineParams = OffsetLineParams {
    delay: 0.0,
    loss: 0.0,
    z0: 50.0,
    port_z0: 50.0,
};

const fn coax(delay: f64, loss: f64) -> OffsetLineParams {
    OffsetLineParams {
        delay,
        loss,
        z0: 50.0,
        port_z0: 50.0,
    }
}

const fn short_def(
    connector: Connector,
    band: Band,
    position: u8,
    line: OffsetLineParams,
    l0: f64,
    l1: f64,
    l2: f64,
    l3: f64,
) -> StandardDef {
    StandardDef {
        kind: StandardKind::Short,
        connector: Some(connector),
        band,
        position,
        line,
        termination: TerminationSpec::Short { l0, l1, l2, l3 },
    }
}

const fn open_def(
    connector: Connector,
    band: Band,
    line: OffsetLineParams,
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
) -> StandardDef {
    StandardDef {
        kind: StandardKind::Open,
        connector: Some(connector),
        band,
        position: 1,
        line,
        termination: TerminationSpec::Open { c0, c1, c2, c3 },
    }
}

const fn load_def(connector: Connector) -> StandardDef {
    StandardDef {
        kind: StandardKind::Load,
        connector: Some(connector),
        band: Band::Broadband,
        position: 1,
        line: NO_OFFSET,
        termination: TerminationSpec::Load,
    }
}

/// Keysight 85056D standard definitions
pub const KEYSIGHT_85056D: &[StandardDef] = &[
    short_def(Connector::Male, Band::Broadband, 1, coax(22.548e-12, 3.554e9),
        2.1636e-12, -146.35e-24, 4.0443e-33, -0.0363e-42),
    short_def(Connector::Female, Band::Broadband, 1, coax(22.548e-12, 3.554e9),
        2.1636e-12, -146.35e-24, 4.0443e-33, -0.0363e-42),
    open_def(Connector::Male, Band::Broadband, coax(20.837e-12, 3.23e9),
        29.722e-15, 165.78e-27, -3.5386e-36, 0.071e-45),
    open_def(Connector::Female, Band::Broadband, coax(20.837e-12, 3.23e9),
        29.72e-15, 165.78e-27, -3.5385e-36, 0.071e-45),
    load_def(Connector::Male),
    load_def(Connector::Female),
    StandardDef {
        kind: StandardKind::Thru,
        connector: None,
        band: Band::Broadband,
        position: 1,
        line: NO_OFFSET,
        termination: TerminationSpec::Thru,
    },
];

/// Keysight 85058B standard definitions
pub const KEYSIGHT_85058B: &[StandardDef] = &[
    // Male shorts; l2 of short 1 broadband and l0 of short 1 high-band are
    // published without a plausible exponent and fail validate()
    short_def(Connector::Male, Band::Broadband, 1, coax(18.012e-12, 4.0608e9),
        0.9658e-12, 8.9552e-24, -0.7884, 0.0079e-42),
    short_def(Connector::Male, Band::Low, 1, coax(17.998e-12, 4.1099e9),
        -0.0845e-12, 163.6838e-24, -7.0736e-33, 0.0811e-42),
    short_def(Connector::Male, Band::High, 1, coax(18.012e-12, 4.0087e9),
        -38.329, 1436.9e-24, -24.863e-33, 0.1393e-42),
    short_def(Connector::Male, Band::Broadband, 2, coax(21.015e-12, 3.9424e9),
        5.2837e-12, -255.25e-24, 4.4398e-33, -0.0248e-42),
    short_def(Connector::Male, Band::Broadband, 3, coax(23.750e-12, 3.9568e9),
        -18.399e-12, 854.22e-24, -12.502e-33, 0.0595e-42),
    short_def(Connector::Male, Band::Broadband, 4, coax(25.351e-12, 3.8911e9),
        31.176e-12, -1738.2e-24, 32.421e-33, -0.1988e-42),
    // Female shorts
    short_def(Connector::Female, Band::Broadband, 1, coax(18.012e-12, 4.0812e9),
        1.4957e-12, -323.18e-24, 11.624e-33, -0.10939e-42),
    short_def(Connector::Female, Band::Low, 1, coax(18.012e-12, 3.9664e9),
        1.8222e-12, -934.86e-24, 64.091e-33, -1.1161e-42),
    short_def(Connector::Female, Band::High, 1, coax(18.012e-12, 4.0306e9),
        81.443e-12, -5397.5e-24, 114.29e-33, -0.77746e-42),
    short_def(Connector::Female, Band::Broadband, 2, coax(21.015e-12, 3.9661e9),
        -168.11e-12, 10025e-24, -195.63e-33, 1.2447e-42),
    short_def(Connector::Female, Band::Broadband, 3, coax(23.750e-12, 3.9432e9),
        -85.542e-12, 5237.9e-24, -105.29e-33, 0.68943e-42),
    short_def(Connector::Female, Band::Broadband, 4, coax(25.351e-12, 3.8798e9),
        83.336e-12, -4925.8e-24, 95.83e-33, -0.61258e-42),
    // Opens
    open_def(Connector::Male, Band::Broadband, coax(18.011e-12, 3.2815e9),
        2.2757e-15, 0.60959e-27, -3.9739e-36, 0.05204e-45),
    open_def(Connector::Male, Band::Low, coax(18.011e-12, 3.2762e9),
        2.127e-15, 73.815e-27, -9.1135e-36, 0.13886e-45),
    open_def(Connector::Female, Band::Broadband, coax(18.001e-12, 3.2822e9),
        -3.5342e-15, 425.24e-27, -13.946e-36, 0.12741e-45),
    open_def(Connector::Female, Band::Low, coax(18.015e-12, 3.2754e9),
        -7.7748e-15, 1332.4e-27, -64.26e-36, 0.90991e-45),
    // Loads
    load_def(Connector::Male),
    load_def(Connector::Female),
];

/// All standard definitions of a kit
pub fn standards(kit: KitId) -> &'static [StandardDef] {
    match kit {
        KitId::Keysight85056D => KEYSIGHT_85056D,
        KitId::Keysight85058B => KEYSIGHT_85058B,
    }
}

/// A catalog data-entry plausibility finding
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogWarning {
    pub kit: KitId,
    pub kind: StandardKind,
    pub connector: Option<Connector>,
    pub band: Band,
    pub position: u8,
    pub coefficient: &'static str,
    pub value: f64,
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, fm: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fm,
            "{:?} {:?} {:?} {:?} #{}: coefficient {} = {:e} has implausible magnitude",
            self.kit, self.connector, self.band, self.kind, self.position, self.coefficient,
            self.value
        )
    }
}

// Plausibility ceilings per polynomial order: physical kit coefficients sit
// orders of magnitude below these, while a value missing its power-of-ten
// exponent lands far above.
const L_MAX: [f64; 4] = [1e-9, 1e-19, 1e-29, 1e-38];
const C_MAX: [f64; 4] = [1e-12, 1e-23, 1e-32, 1e-41];
const L_NAMES: [&str; 4] = ["l0", "l1", "l2", "l3"];
const C_NAMES: [&str; 4] = ["c0", "c1", "c2", "c3"];

/// Screen a kit's coefficient tables for data-entry outliers.
///
/// Returns one warning per implausible coefficient; the catalog values
/// themselves are never altered.
pub fn validate(kit: KitId) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();
    for def in standards(kit) {
        let (coeffs, max, names) = match def.termination {
            TerminationSpec::Short { l0, l1, l2, l3 } => ([l0, l1, l2, l3], L_MAX, L_NAMES),
            TerminationSpec::Open { c0, c1, c2, c3 } => ([c0, c1, c2, c3], C_MAX, C_NAMES),
            TerminationSpec::Load | TerminationSpec::Thru => continue,
        };
        for k in 0..4 {
            if coeffs[k].abs() > max[k] {
                warnings.push(CatalogWarning {
                    kit,
                    kind: def.kind,
                    connector: def.connector,
                    band: def.band,
                    position: def.position,
                    coefficient: names[k],
                    value: coeffs[k],
                });
            }
        }
    }
    warnings
}

/// Look up a single standard definition
pub fn find(
    kit: KitId,
    kind: StandardKind,
    connector: Connector,
    band: Band,
    position: u8,
) -> Option<&'static StandardDef> {
    standards(kit).iter().find(|d| {
        d.kind == kind
            && d.connector == Some(connector)
            && d.band == band
            && d.position == position
    })
}

/// The short/open/load triple a one-port calibration uses, for standards of
/// the given connector sex.
///
/// Band-switched kits contribute their broadband (coarse) short 1 and open
/// definitions, matching the vendor's recommended single-band workflow.
pub fn sol_triple(kit: KitId, connector: Connector) -> Result<[&'static StandardDef; 3]> {
    let pick = |kind: StandardKind| {
        find(kit, kind, connector, Band::Broadband, 1).ok_or_else(|| {
            CalError::InvalidParameter(format!(
                "kit {:?} has no broadband {:?} {:?} standard",
                kit, connector, kind
            ))
        })
    };
    Ok([
        pick(StandardKind::Short)?,
        pick(StandardKind::Open)?,
        pick(StandardKind::Load)?,
    ])
}

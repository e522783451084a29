//! rfcal-core: One-port VNA calibration library
//!
//! Synthesizes the ideal frequency response of coaxial calibration standards
//! (short, open, load, thru) from vendor-published physical coefficients, and
//! solves/applies the classical one-port 3-term error model (directivity,
//! source match, reflection tracking).
//!
//! ## Modules
//!
//! - `frequency` - Frequency grid representation
//! - `network` - One-/two-port complex network primitive
//! - `media` - Lossy coaxial offset-line model
//! - `standards` - Termination models and standard synthesis
//! - `kits` - Vendor calibration-kit coefficient catalog
//! - `calibration` - SOL error-term solve and correction

pub mod calibration;
pub mod constants;
pub mod error;
pub mod frequency;
pub mod kits;
pub mod media;
pub mod network;
pub mod standards;

pub use calibration::{CalSession, ErrorModel, OnePortSol};
pub use error::{CalError, Result};
pub use frequency::Frequency;
pub use network::Network;
pub use standards::{synthesize_standard, TerminationSpec};

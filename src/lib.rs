//! Solar-plus-storage microgrid sizing calculator.
//!
//! Given a site's daily energy usage and peak demand, recommends battery,
//! solar array, and inverter capacities under adjustable design assumptions.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod profile;
pub mod report;
/// The sizing formula and its request/result types.
pub mod sizing;

pub use error::SizingError;
pub use profile::BusinessProfile;
pub use sizing::{SizingConfiguration, SizingInputs, SizingResult, compute};

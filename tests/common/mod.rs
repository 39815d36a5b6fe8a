//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use microgrid_sizer::{SizingConfiguration, SizingInputs, SizingResult, compute};

/// Reference site load (100 kWh/day, 15 kW peak).
pub fn reference_inputs() -> SizingInputs {
    SizingInputs::new(100.0, 15.0)
}

/// Default design assumptions.
pub fn default_config() -> SizingConfiguration {
    SizingConfiguration::default()
}

/// Sizes a load that is known to be valid.
pub fn size(inputs: SizingInputs, config: SizingConfiguration) -> SizingResult {
    compute(inputs, config).expect("fixture inputs are valid")
}

/// Whether `value` has at most one decimal place.
pub fn has_one_decimal(value: f64) -> bool {
    let scaled = value * 10.0;
    (scaled - scaled.round()).abs() < 1e-6
}

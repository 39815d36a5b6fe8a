//! The sizing formula: site load and assumptions in, component capacities out.

use tracing::debug;

use super::types::{SizingConfiguration, SizingInputs, SizingResult};
use crate::error::SizingError;

/// Hours in the reference day that `backup_hours` is scaled against.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Site load after loss derating, before any sizing margin is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedLoad {
    /// Daily energy drawn including losses (kWh).
    pub daily_usage_kwh: f64,
    /// Peak power drawn including losses (kW).
    pub peak_demand_kw: f64,
}

/// Inflates usage and demand by the loss fraction.
///
/// Real draw exceeds the nameplate load by `system_losses`, so both figures
/// are scaled by `1 + system_losses` once, ahead of every other derating.
pub fn adjust_for_losses(inputs: &SizingInputs, system_losses: f64) -> AdjustedLoad {
    let factor = 1.0 + system_losses;
    AdjustedLoad {
        daily_usage_kwh: inputs.daily_energy_usage_kwh * factor,
        peak_demand_kw: inputs.peak_power_demand_kw * factor,
    }
}

/// Computes recommended battery, solar, and inverter capacities.
///
/// - battery: the share of a day's adjusted usage covered by `backup_hours`,
///   inflated for unusable depth of discharge and the safety factor
/// - solar: the full adjusted daily energy produced within the peak sun hours
/// - inverter: adjusted peak demand with the safety factor
///
/// Each output is rounded with [`round1`].
///
/// # Errors
///
/// Returns [`SizingError::InvalidInput`] if usage or demand is not strictly
/// positive, if any assumption is outside its domain, or if the load is so
/// large that a capacity overflows.
///
/// # Examples
///
/// ```
/// use microgrid_sizer::sizing::{compute, SizingConfiguration, SizingInputs};
///
/// let result = compute(SizingInputs::new(100.0, 15.0), SizingConfiguration::default())?;
/// assert_eq!(result.battery_capacity_kwh, 172.5);
/// assert_eq!(result.solar_capacity_kw, 27.6);
/// assert_eq!(result.inverter_size_kw, 20.7);
/// # Ok::<(), microgrid_sizer::SizingError>(())
/// ```
pub fn compute(
    inputs: SizingInputs,
    config: SizingConfiguration,
) -> Result<SizingResult, SizingError> {
    inputs.validate()?;
    config.validate()?;

    let adjusted = adjust_for_losses(&inputs, config.system_losses);

    let backup_energy_kwh = adjusted.daily_usage_kwh * config.backup_hours / HOURS_PER_DAY;
    let battery = backup_energy_kwh / config.battery_depth_of_discharge * config.safety_factor;
    let solar = adjusted.daily_usage_kwh / config.solar_peak_hours * config.safety_factor;
    let inverter = adjusted.peak_demand_kw * config.safety_factor;

    let result = SizingResult {
        battery_capacity_kwh: sized(battery, "daily_energy_usage_kwh")?,
        solar_capacity_kw: sized(solar, "daily_energy_usage_kwh")?,
        inverter_size_kw: sized(inverter, "peak_power_demand_kw")?,
    };
    debug!(
        daily_kwh = inputs.daily_energy_usage_kwh,
        peak_kw = inputs.peak_power_demand_kw,
        battery_kwh = result.battery_capacity_kwh,
        solar_kw = result.solar_capacity_kw,
        inverter_kw = result.inverter_size_kw,
        "sized microgrid"
    );
    Ok(result)
}

/// Rounds to one decimal place, ties to even.
///
/// The tie is decided on `x * 10.0` as an `f64`: `0.25` scales to exactly
/// `2.5` and rounds to `0.2`, `1.75` scales to `17.5` and rounds to `1.8`.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round_ties_even() / 10.0
}

/// Rounds a capacity, rejecting loads whose result overflows `f64`.
fn sized(capacity: f64, field: &'static str) -> Result<f64, SizingError> {
    let rounded = round1(capacity);
    if capacity.is_finite() && rounded.is_finite() {
        Ok(rounded)
    } else {
        Err(SizingError::invalid_input(
            field,
            "is too large to size: the result overflows",
        ))
    }
}

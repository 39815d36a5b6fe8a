//! Sizing request and result types: site load, design assumptions, and sized outputs.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::SizingError;

/// Accepted ranges for each design assumption (bounds inclusive).
pub mod domain {
    use std::ops::RangeInclusive;

    /// Hours of storage autonomy.
    pub const BACKUP_HOURS: RangeInclusive<f64> = 12.0..=72.0;
    /// Full-sun-equivalent hours per day.
    pub const SOLAR_PEAK_HOURS: RangeInclusive<f64> = 3.0..=7.0;
    /// Usable fraction of nominal battery capacity.
    pub const BATTERY_DEPTH_OF_DISCHARGE: RangeInclusive<f64> = 0.5..=0.9;
    /// Fractional wiring and conversion losses.
    pub const SYSTEM_LOSSES: RangeInclusive<f64> = 0.1..=0.3;
    /// Multiplicative overdesign margin.
    pub const SAFETY_FACTOR: RangeInclusive<f64> = 1.1..=1.5;
}

/// Energy profile of the site being sized.
///
/// # Examples
///
/// ```
/// use microgrid_sizer::sizing::types::SizingInputs;
///
/// let inputs = SizingInputs::new(100.0, 15.0);
/// assert!(inputs.validate().is_ok());
/// assert!(SizingInputs::new(0.0, 15.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingInputs {
    /// Average daily energy consumption (kWh, > 0).
    pub daily_energy_usage_kwh: f64,
    /// Maximum instantaneous power draw (kW, > 0).
    pub peak_power_demand_kw: f64,
}

impl SizingInputs {
    /// Creates a new input pair. Call [`SizingInputs::validate`] or let
    /// [`compute`](crate::sizing::compute) reject it.
    pub const fn new(daily_energy_usage_kwh: f64, peak_power_demand_kw: f64) -> Self {
        Self {
            daily_energy_usage_kwh,
            peak_power_demand_kw,
        }
    }

    /// Checks that both values are finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidInput`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SizingError> {
        check_positive("daily_energy_usage_kwh", self.daily_energy_usage_kwh)?;
        check_positive("peak_power_demand_kw", self.peak_power_demand_kw)
    }
}

/// Design assumptions applied to every sizing request.
///
/// Defaults match the calculator's recommended starting point. Deserializes
/// from a partial TOML/JSON table, filling absent fields from [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SizingConfiguration {
    /// Hours of storage autonomy required, within [12, 72].
    pub backup_hours: f64,
    /// Effective daily full-sun-equivalent hours, within [3, 7].
    pub solar_peak_hours: f64,
    /// Usable fraction of nominal battery capacity, within [0.5, 0.9].
    pub battery_depth_of_discharge: f64,
    /// Fractional derating for wiring and conversion losses, within [0.1, 0.3].
    pub system_losses: f64,
    /// Multiplicative overdesign margin, within [1.1, 1.5].
    pub safety_factor: f64,
}

impl Default for SizingConfiguration {
    fn default() -> Self {
        Self {
            backup_hours: 24.0,
            solar_peak_hours: 5.0,
            battery_depth_of_discharge: 0.8,
            system_losses: 0.15,
            safety_factor: 1.2,
        }
    }
}

impl SizingConfiguration {
    /// Returns every assumption that is non-finite or outside its domain.
    ///
    /// An empty vector means the configuration is usable.
    pub fn violations(&self) -> Vec<SizingError> {
        [
            ("backup_hours", self.backup_hours, domain::BACKUP_HOURS),
            (
                "solar_peak_hours",
                self.solar_peak_hours,
                domain::SOLAR_PEAK_HOURS,
            ),
            (
                "battery_depth_of_discharge",
                self.battery_depth_of_discharge,
                domain::BATTERY_DEPTH_OF_DISCHARGE,
            ),
            ("system_losses", self.system_losses, domain::SYSTEM_LOSSES),
            ("safety_factor", self.safety_factor, domain::SAFETY_FACTOR),
        ]
        .into_iter()
        .filter_map(|(field, value, range)| check_within(field, value, &range).err())
        .collect()
    }

    /// Checks every assumption against its domain.
    ///
    /// # Errors
    ///
    /// Returns the first [`SizingError::InvalidInput`] found.
    pub fn validate(&self) -> Result<(), SizingError> {
        match self.violations().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Recommended component capacities, each rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    /// Nominal battery storage capacity (kWh).
    pub battery_capacity_kwh: f64,
    /// Solar PV array nameplate capacity (kW).
    pub solar_capacity_kw: f64,
    /// Inverter continuous power rating (kW).
    pub inverter_size_kw: f64,
}

fn check_positive(field: &'static str, value: f64) -> Result<(), SizingError> {
    if !value.is_finite() {
        return Err(SizingError::invalid_input(
            field,
            format!("must be a finite number, got {value}"),
        ));
    }
    if value <= 0.0 {
        return Err(SizingError::invalid_input(
            field,
            format!("must be > 0, got {value}"),
        ));
    }
    Ok(())
}

fn check_within(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), SizingError> {
    if !value.is_finite() {
        return Err(SizingError::invalid_input(
            field,
            format!("must be a finite number, got {value}"),
        ));
    }
    if !range.contains(&value) {
        return Err(SizingError::invalid_input(
            field,
            format!(
                "must be within [{}, {}], got {value}",
                range.start(),
                range.end()
            ),
        ));
    }
    Ok(())
}

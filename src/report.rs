//! Rendering of a sizing run: headline figures, parameter breakdown, and exports.

use std::fmt;
use std::io::{self, Write};

use comfy_table::{Attribute, Cell, CellAlignment, Table, modifiers, presets};
use serde::Serialize;

use crate::error::SizingError;
use crate::profile::BusinessProfile;
use crate::sizing::{SizingConfiguration, SizingInputs, SizingResult, compute};

/// Column header for CSV export.
const CSV_HEADER: &str = "profile,daily_energy_usage_kwh,peak_power_demand_kw,\
                          backup_hours,solar_peak_hours,battery_depth_of_discharge,\
                          system_losses,safety_factor,\
                          battery_capacity_kwh,solar_capacity_kw,inverter_size_kw";

const EXPLANATION: &str = "\
What these results mean:
- Battery Storage: total energy storage capacity needed for your backup duration
- Solar PV Array: solar panel system size needed to generate your daily energy usage
- Inverter Size: power rating needed to handle your peak demand";

/// A sizing result together with the load and assumptions that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct SizingReport {
    /// Profile the load was taken from.
    pub profile: BusinessProfile,
    /// Load that was sized.
    pub inputs: SizingInputs,
    /// Assumptions used.
    pub configuration: SizingConfiguration,
    /// Recommended capacities.
    pub result: SizingResult,
}

impl SizingReport {
    /// Runs the sizing formula and captures its inputs for display.
    ///
    /// # Errors
    ///
    /// Propagates [`SizingError::InvalidInput`] from [`compute`].
    pub fn build(
        profile: BusinessProfile,
        inputs: SizingInputs,
        configuration: SizingConfiguration,
    ) -> Result<Self, SizingError> {
        let result = compute(inputs, configuration)?;
        Ok(Self {
            profile,
            inputs,
            configuration,
            result,
        })
    }

    /// Parameter/value rows describing the calculation.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let c = &self.configuration;
        vec![
            (
                "Daily Energy Usage",
                format!("{} kWh", self.inputs.daily_energy_usage_kwh),
            ),
            (
                "Peak Power Demand",
                format!("{} kW", self.inputs.peak_power_demand_kw),
            ),
            ("Backup Duration", format!("{} hours", c.backup_hours)),
            ("Solar Peak Hours", format!("{} hours", c.solar_peak_hours)),
            (
                "Battery Depth of Discharge",
                percent(c.battery_depth_of_discharge),
            ),
            ("System Losses", percent(c.system_losses)),
            ("Safety Factor", format!("{}x", c.safety_factor)),
        ]
    }

    /// Builds the "Calculation Details" table.
    pub fn details_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
        table.set_header(vec![
            Cell::new("Parameter").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);
        for (parameter, value) in self.details() {
            table.add_row(vec![
                Cell::new(parameter),
                Cell::new(value).set_alignment(CellAlignment::Right),
            ]);
        }
        table
    }

    /// Plain-language description of the three outputs.
    pub const fn explanation() -> &'static str {
        EXPLANATION
    }

    /// Writes a header and a single data row to any writer.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if writing fails.
    pub fn write_csv(&self, writer: impl Write) -> io::Result<()> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);
        wtr.write_record(CSV_HEADER.split(',').map(str::trim))?;

        let c = &self.configuration;
        let r = &self.result;
        wtr.write_record(&[
            self.profile.slug().to_string(),
            self.inputs.daily_energy_usage_kwh.to_string(),
            self.inputs.peak_power_demand_kw.to_string(),
            c.backup_hours.to_string(),
            c.solar_peak_hours.to_string(),
            c.battery_depth_of_discharge.to_string(),
            c.system_losses.to_string(),
            c.safety_factor.to_string(),
            format!("{:.1}", r.battery_capacity_kwh),
            format!("{:.1}", r.solar_capacity_kw),
            format!("{:.1}", r.inverter_size_kw),
        ])?;

        wtr.flush()?;
        Ok(())
    }
}

impl fmt::Display for SizingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        writeln!(f, "--- Recommended System Sizes ({}) ---", self.profile)?;
        writeln!(f, "Battery Storage:  {:.1} kWh", r.battery_capacity_kwh)?;
        writeln!(f, "Solar PV Array:   {:.1} kW", r.solar_capacity_kw)?;
        write!(f, "Inverter Size:    {:.1} kW", r.inverter_size_kw)
    }
}

/// Builds a table of the built-in profiles and their loads.
pub fn profiles_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec!["Profile", "Slug", "Daily Usage", "Peak Demand"]);
    for profile in BusinessProfile::ALL {
        let inputs = profile.default_inputs();
        table.add_row(vec![
            Cell::new(profile.name()),
            Cell::new(profile.slug()).add_attribute(Attribute::Dim),
            Cell::new(format!("{} kWh", inputs.daily_energy_usage_kwh))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{} kW", inputs.peak_power_demand_kw))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

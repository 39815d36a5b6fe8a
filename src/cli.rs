//! Command-line arguments for the `microgrid-sizer` binary.

#[cfg(feature = "api")]
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{AssumptionOverrides, ConfigError, SiteConfig};
use crate::profile::BusinessProfile;

/// Recommend battery, solar and inverter sizes for a solar-plus-storage microgrid.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Business profile: small-retail-store, restaurant, small-office, custom.
    #[arg(long, conflicts_with = "site")]
    pub profile: Option<String>,

    /// Load the site and assumptions from a TOML file.
    #[arg(long, value_name = "PATH")]
    pub site: Option<PathBuf>,

    /// Average daily energy consumption in kWh (Custom profile only).
    #[arg(long = "daily-kwh", value_name = "KWH")]
    pub daily_kwh: Option<f64>,

    /// Maximum power demand in kW (Custom profile only).
    #[arg(long = "peak-kw", value_name = "KW")]
    pub peak_kw: Option<f64>,

    #[command(flatten)]
    pub assumptions: AssumptionOverrides,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Print the built-in profiles and exit.
    #[arg(long)]
    pub list_profiles: bool,

    /// Serve the sizing API instead of printing a single result.
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// Address for `--serve`.
    #[cfg(feature = "api")]
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,
}

/// How a sizing report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Headline figures plus a parameter table.
    Table,
    /// Pretty-printed JSON report.
    Json,
    /// One CSV header and one data row.
    Csv,
}

impl Args {
    /// Builds the site configuration these arguments describe.
    ///
    /// `--site` takes priority, then `--profile`, then the `Custom` profile.
    /// Manual load values and assumption flags are layered on top.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the site file cannot be loaded or the
    /// profile is unknown. Range checks are left to [`SiteConfig::validate`].
    pub fn site_config(&self) -> Result<SiteConfig, ConfigError> {
        let mut site = if let Some(ref path) = self.site {
            SiteConfig::from_toml_file(path)?
        } else if let Some(ref name) = self.profile {
            SiteConfig::from_profile(name)?
        } else {
            SiteConfig::from_profile(BusinessProfile::Custom.slug())?
        };

        if self.daily_kwh.is_some() {
            site.site.daily_energy_usage_kwh = self.daily_kwh;
        }
        if self.peak_kw.is_some() {
            site.site.peak_power_demand_kw = self.peak_kw;
        }
        site.assumptions = self.assumptions.apply_to(site.assumptions);

        Ok(site)
    }
}

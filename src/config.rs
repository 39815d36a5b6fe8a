//! TOML-based site configuration: which load to size and under which assumptions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::error::SizingError;
use crate::profile::{BusinessProfile, UnknownProfile};
use crate::sizing::{SizingConfiguration, SizingInputs};

/// Top-level site description parsed from TOML.
///
/// Every section is optional. An empty file sizes the `Custom` profile's
/// pre-filled load under the default assumptions.
///
/// ```toml
/// [site]
/// profile = "custom"
/// daily_energy_usage_kwh = 120.0
/// peak_power_demand_kw = 18.0
///
/// [assumptions]
/// backup_hours = 48
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Load selection.
    #[serde(default)]
    pub site: SiteSection,
    /// Design assumptions.
    #[serde(default)]
    pub assumptions: SizingConfiguration,
}

/// Load selection: a named profile plus manual values for `Custom`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Profile display name or slug.
    pub profile: String,
    /// Manual daily usage (kWh), `Custom` only.
    pub daily_energy_usage_kwh: Option<f64>,
    /// Manual peak demand (kW), `Custom` only.
    pub peak_power_demand_kw: Option<f64>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            profile: BusinessProfile::Custom.slug().to_string(),
            daily_energy_usage_kwh: None,
            peak_power_demand_kw: None,
        }
    }
}

/// Per-request replacements for individual assumptions.
///
/// Shared by the command line and the HTTP query string; any field left
/// `None` keeps the value from the loaded configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, clap::Args)]
pub struct AssumptionOverrides {
    /// Hours of battery backup needed [12-72].
    #[arg(long, value_name = "HOURS")]
    pub backup_hours: Option<f64>,
    /// Average daily peak sun hours [3-7].
    #[arg(long, value_name = "HOURS")]
    pub solar_peak_hours: Option<f64>,
    /// Maximum battery discharge depth [0.5-0.9].
    #[arg(long, value_name = "FRACTION")]
    pub depth_of_discharge: Option<f64>,
    /// Expected system losses [0.1-0.3].
    #[arg(long, value_name = "FRACTION")]
    pub system_losses: Option<f64>,
    /// Additional capacity buffer [1.1-1.5].
    #[arg(long, value_name = "FACTOR")]
    pub safety_factor: Option<f64>,
}

impl AssumptionOverrides {
    /// Returns `base` with every supplied override applied.
    pub fn apply_to(&self, base: SizingConfiguration) -> SizingConfiguration {
        SizingConfiguration {
            backup_hours: self.backup_hours.unwrap_or(base.backup_hours),
            solar_peak_hours: self.solar_peak_hours.unwrap_or(base.solar_peak_hours),
            battery_depth_of_discharge: self
                .depth_of_discharge
                .unwrap_or(base.battery_depth_of_discharge),
            system_losses: self.system_losses.unwrap_or(base.system_losses),
            safety_factor: self.safety_factor.unwrap_or(base.safety_factor),
        }
    }
}

/// Failure to load or validate a site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read \"{}\": {source}", .path.display())]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The TOML is malformed or contains unknown fields.
    #[error("invalid site TOML: {0}")]
    Parse(#[from] toml::de::Error),
    /// `site.profile` names no built-in profile.
    #[error("config error: site.profile — {0}")]
    UnknownProfile(#[from] UnknownProfile),
    /// A value violates its constraint.
    #[error("config error: {field} — {message}")]
    Invalid {
        /// Dotted field path (e.g. `"assumptions.backup_hours"`).
        field: String,
        /// Human-readable constraint description.
        message: String,
    },
}

impl ConfigError {
    fn from_sizing(section: &str, err: SizingError) -> Self {
        let SizingError::InvalidInput { field, message } = err;
        Self::Invalid {
            field: format!("{section}.{field}"),
            message,
        }
    }
}

impl SiteConfig {
    /// Returns the configuration for a named profile with default assumptions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProfile`] if the name is not recognised.
    pub fn from_profile(name: &str) -> Result<Self, ConfigError> {
        let profile = BusinessProfile::from_name(name)?;
        Ok(Self {
            site: SiteSection {
                profile: profile.slug().to_string(),
                ..SiteSection::default()
            },
            assumptions: SizingConfiguration::default(),
        })
    }

    /// Parses a site configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a site configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// The selected profile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProfile`] if `site.profile` is not recognised.
    pub fn profile(&self) -> Result<BusinessProfile, ConfigError> {
        Ok(BusinessProfile::from_name(&self.site.profile)?)
    }

    /// The load to size: the profile pair, overridden by manual values for `Custom`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unknown profile, manual values on a
    /// fixed profile, or non-positive usage/demand.
    pub fn inputs(&self) -> Result<SizingInputs, ConfigError> {
        let inputs = self
            .profile()?
            .resolve_inputs(
                self.site.daily_energy_usage_kwh,
                self.site.peak_power_demand_kw,
            )
            .map_err(|e| ConfigError::from_sizing("site", e))?;
        inputs
            .validate()
            .map_err(|e| ConfigError::from_sizing("site", e))?;
        Ok(inputs)
    }

    /// The design assumptions.
    pub fn configuration(&self) -> SizingConfiguration {
        self.assumptions
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.inputs() {
            errors.push(e);
        }
        errors.extend(
            self.assumptions
                .violations()
                .into_iter()
                .map(|e| ConfigError::from_sizing("assumptions", e)),
        );

        errors
    }
}

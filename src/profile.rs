//! Built-in business profiles mapping a site type to its typical load.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::error::SizingError;
use crate::sizing::SizingInputs;

/// Typical site loads offered as starting points.
///
/// `Custom` carries pre-filled values that the caller overrides with manual
/// entry; the other profiles always size their fixed load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessProfile {
    /// Small shop: 50 kWh/day, 8 kW peak.
    SmallRetailStore,
    /// Restaurant: 200 kWh/day, 25 kW peak.
    Restaurant,
    /// Small office: 75 kWh/day, 12 kW peak.
    SmallOffice,
    /// Manual entry, pre-filled with 100 kWh/day, 15 kW peak.
    #[default]
    Custom,
}

/// Unrecognised profile name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown profile \"{}\", available: {}", .name, BusinessProfile::available())]
pub struct UnknownProfile {
    /// The name that failed to resolve.
    pub name: String,
}

impl BusinessProfile {
    /// All profiles in display order.
    pub const ALL: [Self; 4] = [
        Self::SmallRetailStore,
        Self::Restaurant,
        Self::SmallOffice,
        Self::Custom,
    ];

    /// Human-readable name, as shown in selectors.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SmallRetailStore => "Small Retail Store",
            Self::Restaurant => "Restaurant",
            Self::SmallOffice => "Small Office",
            Self::Custom => "Custom",
        }
    }

    /// Kebab-case identifier used on the command line and in query strings.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::SmallRetailStore => "small-retail-store",
            Self::Restaurant => "restaurant",
            Self::SmallOffice => "small-office",
            Self::Custom => "custom",
        }
    }

    /// The profile's load pair.
    pub const fn default_inputs(self) -> SizingInputs {
        match self {
            Self::SmallRetailStore => SizingInputs::new(50.0, 8.0),
            Self::Restaurant => SizingInputs::new(200.0, 25.0),
            Self::SmallOffice => SizingInputs::new(75.0, 12.0),
            Self::Custom => SizingInputs::new(100.0, 15.0),
        }
    }

    /// Whether usage and demand come from manual entry.
    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom)
    }

    /// Resolves a display name or slug, ignoring case.
    ///
    /// `"Small Office"`, `"small-office"` and `"small_office"` all resolve to
    /// [`BusinessProfile::SmallOffice`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownProfile`] listing the accepted slugs.
    pub fn from_name(name: &str) -> Result<Self, UnknownProfile> {
        let wanted = normalize(name);
        Self::ALL
            .into_iter()
            .find(|p| normalize(p.slug()) == wanted)
            .ok_or_else(|| UnknownProfile {
                name: name.to_string(),
            })
    }

    /// Combines the profile load with optional manual entries.
    ///
    /// For [`BusinessProfile::Custom`] each manual value replaces the
    /// pre-filled one independently. Fixed profiles accept no manual values.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidInput`] if a manual value is supplied for
    /// a fixed profile.
    pub fn resolve_inputs(
        self,
        daily_energy_usage_kwh: Option<f64>,
        peak_power_demand_kw: Option<f64>,
    ) -> Result<SizingInputs, SizingError> {
        let base = self.default_inputs();
        if self.is_custom() {
            return Ok(SizingInputs::new(
                daily_energy_usage_kwh.unwrap_or(base.daily_energy_usage_kwh),
                peak_power_demand_kw.unwrap_or(base.peak_power_demand_kw),
            ));
        }
        if daily_energy_usage_kwh.is_some() {
            return Err(SizingError::invalid_input(
                "daily_energy_usage_kwh",
                format!("can only be set for the Custom profile, not {}", self.name()),
            ));
        }
        if peak_power_demand_kw.is_some() {
            return Err(SizingError::invalid_input(
                "peak_power_demand_kw",
                format!("can only be set for the Custom profile, not {}", self.name()),
            ));
        }
        Ok(base)
    }

    fn available() -> String {
        Self::ALL
            .iter()
            .map(|p| p.slug())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for BusinessProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::config::AssumptionOverrides;
use crate::profile::BusinessProfile;

/// Query parameters for `/size`.
///
/// Parameter names match the CLI flags with underscores.
#[derive(Debug, Default, Deserialize)]
pub struct SizeQuery {
    /// Profile name or slug; `custom` when absent.
    pub profile: Option<String>,
    /// Manual daily usage (kWh), `custom` only.
    pub daily_kwh: Option<f64>,
    /// Manual peak demand (kW), `custom` only.
    pub peak_kw: Option<f64>,
    /// Hours of battery backup.
    pub backup_hours: Option<f64>,
    /// Daily peak sun hours.
    pub solar_peak_hours: Option<f64>,
    /// Battery depth of discharge.
    pub depth_of_discharge: Option<f64>,
    /// System loss fraction.
    pub system_losses: Option<f64>,
    /// Safety factor.
    pub safety_factor: Option<f64>,
}

impl SizeQuery {
    /// The assumption fields of the query.
    pub fn overrides(&self) -> AssumptionOverrides {
        AssumptionOverrides {
            backup_hours: self.backup_hours,
            solar_peak_hours: self.solar_peak_hours,
            depth_of_discharge: self.depth_of_discharge,
            system_losses: self.system_losses,
            safety_factor: self.safety_factor,
        }
    }
}

/// One entry of the `/profiles` listing.
#[derive(Debug, Serialize)]
pub struct ProfileRecord {
    /// Identifier accepted by `/size?profile=`.
    pub slug: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Daily usage (kWh).
    pub daily_energy_usage_kwh: f64,
    /// Peak demand (kW).
    pub peak_power_demand_kw: f64,
    /// Whether `daily_kwh`/`peak_kw` may be supplied.
    pub manual_entry: bool,
}

impl From<BusinessProfile> for ProfileRecord {
    fn from(p: BusinessProfile) -> Self {
        let inputs = p.default_inputs();
        Self {
            slug: p.slug(),
            name: p.name(),
            daily_energy_usage_kwh: inputs.daily_energy_usage_kwh,
            peak_power_demand_kw: inputs.peak_power_demand_kw,
            manual_entry: p.is_custom(),
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_record_from_profile_maps_fields() {
        let record = ProfileRecord::from(BusinessProfile::SmallRetailStore);
        assert_eq!(record.slug, "small-retail-store");
        assert_eq!(record.name, "Small Retail Store");
        assert_eq!(record.daily_energy_usage_kwh, 50.0);
        assert_eq!(record.peak_power_demand_kw, 8.0);
        assert!(!record.manual_entry);
        assert!(ProfileRecord::from(BusinessProfile::Custom).manual_entry);
    }

    #[test]
    fn query_overrides_map_depth_of_discharge() {
        let query = SizeQuery {
            depth_of_discharge: Some(0.6),
            ..SizeQuery::default()
        };
        let overrides = query.overrides();
        assert_eq!(overrides.depth_of_discharge, Some(0.6));
        assert_eq!(overrides.backup_hours, None);
    }
}

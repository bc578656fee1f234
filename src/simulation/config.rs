use serde::{Deserialize, Serialize};

use super::params::SimulationParams;

/// Simulation settings as written in the config file or passed on the
/// command line. Unset fields fall back to the built-in defaults.
///
/// Example YAML:
/// ```yaml
/// simulation:
///   initial_volume_tb: 250
///   growth_pct: 35
///   horizon_years: 10
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Data volume in year 1, TB (minimum 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_volume_tb: Option<f64>,

    /// Annual growth percentage (minimum 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_pct: Option<f64>,

    /// Years to simulate (1-15)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_years: Option<u32>,
}

impl SimulationConfig {
    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(&self, other: &SimulationConfig) -> SimulationConfig {
        SimulationConfig {
            initial_volume_tb: other.initial_volume_tb.or(self.initial_volume_tb),
            growth_pct: other.growth_pct.or(self.growth_pct),
            horizon_years: other.horizon_years.or(self.horizon_years),
        }
    }

    /// Fill unset fields from the defaults. Does not validate.
    pub fn resolve(&self) -> SimulationParams {
        let defaults = SimulationParams::default();
        SimulationParams {
            initial_volume_tb: self.initial_volume_tb.unwrap_or(defaults.initial_volume_tb),
            growth_pct: self.growth_pct.unwrap_or(defaults.growth_pct),
            horizon_years: self.horizon_years.unwrap_or(defaults.horizon_years),
        }
    }
}

impl From<SimulationParams> for SimulationConfig {
    fn from(params: SimulationParams) -> Self {
        Self {
            initial_volume_tb: Some(params.initial_volume_tb),
            growth_pct: Some(params.growth_pct),
            horizon_years: Some(params.horizon_years),
        }
    }
}

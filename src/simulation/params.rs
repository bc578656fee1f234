use serde::{Deserialize, Serialize};

pub const DEFAULT_VOLUME_TB: f64 = 100.0;
pub const DEFAULT_GROWTH_PCT: f64 = 20.0;
pub const DEFAULT_HORIZON_YEARS: u32 = 5;

pub const MIN_VOLUME_TB: f64 = 1.0;
pub const MIN_GROWTH_PCT: f64 = 0.0;
pub const MIN_HORIZON_YEARS: u32 = 1;
pub const MAX_HORIZON_YEARS: u32 = 15;

/// Increment applied per key press in the interactive view
pub const VOLUME_STEP_TB: f64 = 10.0;
pub const GROWTH_STEP_PCT: f64 = 1.0;
pub const HORIZON_STEP_YEARS: u32 = 1;

/// The three scalars driving the growth projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Data volume in year 1, TB
    pub initial_volume_tb: f64,
    /// Annual growth as a percentage (20 = 20 %)
    pub growth_pct: f64,
    /// Number of simulated years
    pub horizon_years: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            initial_volume_tb: DEFAULT_VOLUME_TB,
            growth_pct: DEFAULT_GROWTH_PCT,
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    InitialVolume,
    GrowthPct,
    Horizon,
}

impl ParamField {
    pub const ALL: [ParamField; 3] = [
        ParamField::InitialVolume,
        ParamField::GrowthPct,
        ParamField::Horizon,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ParamField::InitialVolume => "Initial volume (TB)",
            ParamField::GrowthPct => "Annual growth (%)",
            ParamField::Horizon => "Horizon (years)",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ParamField::InitialVolume => ParamField::GrowthPct,
            ParamField::GrowthPct => ParamField::Horizon,
            ParamField::Horizon => ParamField::InitialVolume,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            ParamField::InitialVolume => ParamField::Horizon,
            ParamField::GrowthPct => ParamField::InitialVolume,
            ParamField::Horizon => ParamField::GrowthPct,
        }
    }
}

/// Outcome of applying a value: the accepted parameters and whether the
/// requested value had to be pulled back into bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjusted {
    pub params: SimulationParams,
    pub clamped: bool,
}

impl SimulationParams {
    /// Growth as a fraction (0.20 for 20 %)
    pub fn growth_rate(&self) -> f64 {
        self.growth_pct / 100.0
    }

    pub fn value(&self, field: ParamField) -> f64 {
        match field {
            ParamField::InitialVolume => self.initial_volume_tb,
            ParamField::GrowthPct => self.growth_pct,
            ParamField::Horizon => self.horizon_years as f64,
        }
    }

    /// Pull every field into its bounds. Non-finite values reset to defaults.
    pub fn clamped(self) -> Adjusted {
        let volume = clamp_min(self.initial_volume_tb, MIN_VOLUME_TB, DEFAULT_VOLUME_TB);
        let growth = clamp_min(self.growth_pct, MIN_GROWTH_PCT, DEFAULT_GROWTH_PCT);
        let horizon = self
            .horizon_years
            .clamp(MIN_HORIZON_YEARS, MAX_HORIZON_YEARS);

        let params = SimulationParams {
            initial_volume_tb: volume,
            growth_pct: growth,
            horizon_years: horizon,
        };
        Adjusted {
            clamped: params != self,
            params,
        }
    }

    /// Set one field from a user-entered number, re-validating bounds.
    pub fn with_value(self, field: ParamField, value: f64) -> Adjusted {
        let mut next = self;
        let mut clamped = false;
        match field {
            ParamField::InitialVolume => next.initial_volume_tb = value,
            ParamField::GrowthPct => next.growth_pct = value,
            ParamField::Horizon => {
                let years = if value.is_finite() { value.round() } else { f64::NAN };
                clamped = years != value;
                next.horizon_years = if years.is_nan() {
                    DEFAULT_HORIZON_YEARS
                } else if years < MIN_HORIZON_YEARS as f64 {
                    MIN_HORIZON_YEARS
                } else if years > MAX_HORIZON_YEARS as f64 {
                    MAX_HORIZON_YEARS
                } else {
                    years as u32
                };
                clamped |= next.horizon_years as f64 != years;
            }
        }

        let adjusted = next.clamped();
        Adjusted {
            params: adjusted.params,
            clamped: clamped || adjusted.clamped,
        }
    }

    /// Move one field up (`steps > 0`) or down by its step size.
    pub fn stepped(self, field: ParamField, steps: i32) -> Adjusted {
        let delta = match field {
            ParamField::InitialVolume => VOLUME_STEP_TB,
            ParamField::GrowthPct => GROWTH_STEP_PCT,
            ParamField::Horizon => HORIZON_STEP_YEARS as f64,
        };
        self.with_value(field, self.value(field) + delta * steps as f64)
    }
}

fn clamp_min(value: f64, min: f64, default: f64) -> f64 {
    if !value.is_finite() {
        default
    } else {
        value.max(min)
    }
}

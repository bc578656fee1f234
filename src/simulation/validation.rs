use super::config::SimulationConfig;
use super::params::{MAX_HORIZON_YEARS, MIN_GROWTH_PCT, MIN_HORIZON_YEARS, MIN_VOLUME_TB};

/// Validate simulation settings at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_simulation(config: &SimulationConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(volume) = config.initial_volume_tb {
        if !volume.is_finite() || volume < MIN_VOLUME_TB {
            errors.push(format!(
                "simulation.initial_volume_tb: must be at least {} (got {})",
                MIN_VOLUME_TB, volume
            ));
        }
    }

    if let Some(growth) = config.growth_pct {
        if !growth.is_finite() || growth < MIN_GROWTH_PCT {
            errors.push(format!(
                "simulation.growth_pct: must be non-negative (got {})",
                growth
            ));
        }
    }

    if let Some(years) = config.horizon_years {
        if !(MIN_HORIZON_YEARS..=MAX_HORIZON_YEARS).contains(&years) {
            errors.push(format!(
                "simulation.horizon_years: must be between {} and {} (got {})",
                MIN_HORIZON_YEARS, MAX_HORIZON_YEARS, years
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = SimulationConfig {
            initial_volume_tb: Some(1.0),
            growth_pct: Some(0.0),
            horizon_years: Some(15),
        };
        assert!(validate_simulation(&config).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_simulation(&SimulationConfig::default()).is_ok());
    }

    #[test]
    fn test_volume_below_minimum() {
        let config = SimulationConfig {
            initial_volume_tb: Some(0.5),
            ..SimulationConfig::default()
        };
        let errors = validate_simulation(&config).unwrap_err();
        assert!(errors[0].contains("simulation.initial_volume_tb"));
    }

    #[test]
    fn test_negative_growth() {
        let config = SimulationConfig {
            growth_pct: Some(-5.0),
            ..SimulationConfig::default()
        };
        let errors = validate_simulation(&config).unwrap_err();
        assert!(errors[0].contains("growth_pct"));
    }

    #[test]
    fn test_horizon_out_of_range() {
        for years in [0, 16] {
            let config = SimulationConfig {
                horizon_years: Some(years),
                ..SimulationConfig::default()
            };
            let errors = validate_simulation(&config).unwrap_err();
            assert!(errors[0].contains("horizon_years"));
        }
    }

    #[test]
    fn test_collects_all_errors() {
        let config = SimulationConfig {
            initial_volume_tb: Some(f64::NAN), // Error 1
            growth_pct: Some(-1.0),            // Error 2
            horizon_years: Some(0),            // Error 3
        };
        assert_eq!(validate_simulation(&config).unwrap_err().len(), 3);
    }
}

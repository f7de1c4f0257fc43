//! Configuration validation

use crate::{BackendConfig, ConfigError, SimulatorConfig};

/// Validate engine settings before the world is built
pub fn validate_simulator(config: &SimulatorConfig) -> Result<(), ConfigError> {
    if config.grid_size < 10 {
        return Err(ConfigError::Validation(format!(
            "SIM_GRID_SIZE must be at least 10, got {}",
            config.grid_size
        )));
    }
    if config.tick_interval_seconds <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "TICK_INTERVAL_SECONDS must be positive, got {}",
            config.tick_interval_seconds
        )));
    }
    // Stations (3), obstacles, robots, and mission targets all need free
    // cells to land on.
    let cells = config.grid_size as u64 * config.grid_size as u64;
    let occupied = 3 + config.obstacle_count as u64
        + config.robot_count as u64
        + (config.missions_per_priority as u64 * 3);
    if occupied >= cells {
        return Err(ConfigError::Validation(format!(
            "grid of {cells} cells cannot fit {occupied} placed entities"
        )));
    }
    if config.battery_drain_per_move < 0.0 || config.battery_charge_per_tick <= 0.0 {
        return Err(ConfigError::Validation(
            "battery rates must be non-negative (charge strictly positive)".to_string(),
        ));
    }
    Ok(())
}

/// Validate aggregator settings before tasks are spawned
pub fn validate_backend(config: &BackendConfig) -> Result<(), ConfigError> {
    if config.poll_interval_seconds <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "SIM_POLL_INTERVAL_SECONDS must be positive, got {}",
            config.poll_interval_seconds
        )));
    }
    if config.grid_size == 0 {
        return Err(ConfigError::Validation(
            "SIM_GRID_SIZE must be positive".to_string(),
        ));
    }
    if !config.simulator_base_url.starts_with("http://")
        && !config.simulator_base_url.starts_with("https://")
    {
        return Err(ConfigError::Validation(format!(
            "SIMULATOR_BASE_URL must be an http(s) URL, got {:?}",
            config.simulator_base_url
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        validate_simulator(&SimulatorConfig::default()).unwrap();
        validate_backend(&BackendConfig::default()).unwrap();
    }

    #[test]
    fn test_tiny_grid_rejected() {
        let config = SimulatorConfig {
            grid_size: 4,
            ..Default::default()
        };
        assert!(validate_simulator(&config).is_err());
    }

    #[test]
    fn test_overfull_grid_rejected() {
        let config = SimulatorConfig {
            grid_size: 10,
            obstacle_count: 90,
            ..Default::default()
        };
        assert!(validate_simulator(&config).is_err());
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let config = BackendConfig {
            simulator_base_url: "ftp://nope".to_string(),
            ..Default::default()
        };
        assert!(validate_backend(&config).is_err());
    }
}

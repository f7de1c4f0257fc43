//! Simulator (engine) process configuration

use crate::env::{origins_or, var_or, ConfigError};
use serde::{Deserialize, Serialize};

const DEFAULT_SIMULATOR_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:8000",
    "http://127.0.0.1:8000",
];

/// Tuning for the simulation engine and its HTTP surface.
///
/// Grid size and tick cadence come from the environment; the fleet and
/// battery constants are code-level defaults that tests override directly.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SimulatorConfig {
    /// Width and height of the square grid
    pub grid_size: u32,
    /// Seconds between ticks of the background loop
    pub tick_interval_seconds: f64,
    /// Robots created at reset
    pub robot_count: u32,
    /// Obstacles scattered at reset
    pub obstacle_count: u32,
    /// Missions created per priority tier at reset
    pub missions_per_priority: u32,
    /// Battery percent lost per cell moved
    pub battery_drain_per_move: f64,
    /// Battery percent gained per tick on a station
    pub battery_charge_per_tick: f64,
    /// Below this a robot abandons its mission and seeks a charger
    pub low_battery_threshold: f64,
    /// A robot must exceed this to accept a mission
    pub min_battery_for_mission: f64,
    /// CORS allow-list for the simulator HTTP surface
    pub allowed_origins: Vec<String>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            grid_size: 50,
            tick_interval_seconds: 1.0,
            robot_count: 5,
            obstacle_count: 10,
            missions_per_priority: 5,
            battery_drain_per_move: 2.0,
            battery_charge_per_tick: 10.0,
            low_battery_threshold: 20.0,
            min_battery_for_mission: 50.0,
            allowed_origins: DEFAULT_SIMULATOR_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SimulatorConfig {
    /// Load from the environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            grid_size: var_or("SIM_GRID_SIZE", defaults.grid_size)?,
            tick_interval_seconds: var_or(
                "TICK_INTERVAL_SECONDS",
                defaults.tick_interval_seconds,
            )?,
            allowed_origins: origins_or("SIMULATOR_ALLOWED_ORIGINS", DEFAULT_SIMULATOR_ORIGINS),
            ..defaults
        })
    }
}

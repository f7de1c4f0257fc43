//! Backend (aggregator) process configuration

use crate::env::{origins_or, var_opt, var_or, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_FRONTEND_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:3001",
    "http://127.0.0.1:3001",
];

/// Settings for the aggregator service
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the simulation engine to poll
    pub simulator_base_url: String,
    /// Seconds between polls of the engine
    pub poll_interval_seconds: f64,
    /// Grid dimensions reported in the external schema
    pub grid_size: u32,
    /// CORS allow-list for the backend HTTP surface
    pub frontend_origins: Vec<String>,
    /// Credential for the advisory model; `None` disables /ai/decide
    pub gemini_api_key: Option<String>,
    /// Append-only JSONL log of advisory decisions
    pub decisions_log: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            simulator_base_url: "http://127.0.0.1:8001".to_string(),
            poll_interval_seconds: 1.0,
            grid_size: 50,
            frontend_origins: DEFAULT_FRONTEND_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            gemini_api_key: None,
            decisions_log: PathBuf::from("logs/ai_decisions.jsonl"),
        }
    }
}

impl BackendConfig {
    /// Load from the environment, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            simulator_base_url: var_or("SIMULATOR_BASE_URL", defaults.simulator_base_url)?,
            poll_interval_seconds: var_or(
                "SIM_POLL_INTERVAL_SECONDS",
                defaults.poll_interval_seconds,
            )?,
            grid_size: var_or("SIM_GRID_SIZE", defaults.grid_size)?,
            frontend_origins: origins_or("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS),
            gemini_api_key: var_opt("GEMINI_API_KEY"),
            decisions_log: defaults.decisions_log,
        })
    }

    /// The engine endpoint the poller fetches
    pub fn state_url(&self) -> String {
        format!(
            "{}/simulation/state",
            self.simulator_base_url.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_url_joins_cleanly() {
        let mut config = BackendConfig::default();
        assert_eq!(config.state_url(), "http://127.0.0.1:8001/simulation/state");

        config.simulator_base_url = "http://engine:9000/".to_string();
        assert_eq!(config.state_url(), "http://engine:9000/simulation/state");
    }
}

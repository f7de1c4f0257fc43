//! RescueGrid Config - Environment-driven configuration
//!
//! Both processes read their settings from environment variables once at
//! startup; everything has a default so a bare `rescuegrid simulator` /
//! `rescuegrid backend` works out of the box.

pub mod backend;
pub mod env;
pub mod simulator;
pub mod validation;

pub use backend::BackendConfig;
pub use env::ConfigError;
pub use simulator::SimulatorConfig;
pub use validation::{validate_backend, validate_simulator};

//! RescueGrid Sim - The deterministic tick-driven simulation engine
//!
//! The engine owns the ground-truth world: robots, missions, obstacles, and
//! charging stations on a bounded grid. `Engine::tick` advances the world by
//! one discrete step through five strictly ordered phases; `Engine::snapshot`
//! produces the immutable wire-schema view; `Engine::reset` rebuilds the
//! world from scratch.

pub mod engine;
pub mod state;
pub mod world;

pub use engine::Engine;
pub use state::{
    ChargingStationOut, MetricsOut, MissionOut, ObstacleOut, PositionOut, RobotOut,
    SimulationStateOut,
};
pub use world::World;

//! RescueGrid Entities - Robots, missions, obstacles, and charging stations

pub mod charging_station;
pub mod mission;
pub mod obstacle;
pub mod robot;

pub use charging_station::ChargingStation;
pub use mission::{Mission, MissionPriority, MissionStatus};
pub use obstacle::{Obstacle, ObstacleKind};
pub use robot::{Robot, RobotStatus};

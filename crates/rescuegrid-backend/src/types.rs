//! External schema served to downstream clients
//!
//! The aggregator publishes uppercase statuses, stringified ids, tupled
//! positions, and missions split into active and completed lists.

use serde::{Deserialize, Serialize};

/// Robot status on the external surface
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RobotStatus {
    Idle,
    Moving,
    Charging,
    Dead,
}

/// Mission priority on the external surface
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MissionPriority {
    High,
    Medium,
    Low,
}

/// Mission status on the external surface
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RobotState {
    pub id: String,
    pub position: (i32, i32),
    pub battery: f64,
    pub status: RobotStatus,
    pub current_mission: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MapGrid {
    pub width: u32,
    pub height: u32,
    pub obstacles: Vec<(i32, i32)>,
    pub charging_stations: Vec<(i32, i32)>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Mission {
    pub id: String,
    pub priority: MissionPriority,
    pub target: (i32, i32),
    pub status: MissionStatus,
    pub assigned_robot: Option<String>,
}

/// Fleet metrics computed by the aggregator
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    pub active_robots: u32,
    pub completed_missions: u32,
    pub avg_delivery_time: f64,
    pub total_battery_used: f64,
    #[serde(default)]
    pub fleet_battery: f64,
    #[serde(default)]
    pub total_distance_traveled: f64,
}

/// The published simulation state
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SimulationState {
    pub step: u64,
    pub robots: Vec<RobotState>,
    pub grid: MapGrid,
    pub active_missions: Vec<Mission>,
    #[serde(default)]
    pub completed_missions: Vec<Mission>,
}

impl SimulationState {
    /// The state published before the first successful poll
    pub fn empty(grid_size: u32) -> Self {
        Self {
            step: 0,
            robots: Vec::new(),
            grid: MapGrid {
                width: grid_size,
                height: grid_size,
                obstacles: Vec::new(),
                charging_stations: Vec::new(),
            },
            active_missions: Vec::new(),
            completed_missions: Vec::new(),
        }
    }
}

/// One advisory reassignment suggestion
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Reassignment {
    pub robot_id: String,
    pub new_mission_id: String,
}

/// Advisory decision returned by the external model
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Decision {
    pub priority_mission_id: Option<String>,
    pub reassignments: Vec<Reassignment>,
    pub reasoning: String,
}

/// Error body for 4xx/5xx responses
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

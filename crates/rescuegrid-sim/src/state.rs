//! Engine wire schema
//!
//! The serialized view of the world returned by `GET /simulation/state`.
//! Statuses and priorities serialize through their entity enums (lowercase
//! on this surface); floats are rounded to one decimal place.

use crate::world::World;
use chrono::{SecondsFormat, Utc};
use rescuegrid_core::{MissionId, RobotId};
use rescuegrid_entities::{MissionPriority, MissionStatus, ObstacleKind, RobotStatus};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionOut {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RobotOut {
    pub id: RobotId,
    pub x: i32,
    pub y: i32,
    pub battery: f64,
    pub status: RobotStatus,
    pub mission_id: Option<MissionId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MissionOut {
    pub id: MissionId,
    pub priority: MissionPriority,
    pub target: PositionOut,
    pub status: MissionStatus,
    pub assigned_robot: Option<RobotId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObstacleOut {
    #[serde(rename = "type")]
    pub kind: ObstacleKind,
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ChargingStationOut {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetricsOut {
    pub active_robots: u32,
    pub completed_missions: u32,
    pub pending_missions: u32,
    pub total_distance_traveled: f64,
    pub avg_completion_time: f64,
}

/// The full engine snapshot: entity lists, derived metrics, and an
/// ISO-8601 UTC timestamp with a trailing `Z`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationStateOut {
    pub robots: Vec<RobotOut>,
    pub missions: Vec<MissionOut>,
    pub obstacles: Vec<ObstacleOut>,
    pub charging_stations: Vec<ChargingStationOut>,
    pub metrics: MetricsOut,
    pub timestamp: String,
}

impl SimulationStateOut {
    /// Capture the world outside any mutation
    pub fn capture(world: &World) -> Self {
        let robots = world
            .robots
            .iter()
            .map(|r| RobotOut {
                id: r.id,
                x: r.pos.x,
                y: r.pos.y,
                battery: round1(r.battery),
                status: r.status,
                mission_id: r.mission,
            })
            .collect();

        let missions = world
            .missions
            .iter()
            .map(|m| MissionOut {
                id: m.id,
                priority: m.priority,
                target: PositionOut {
                    x: m.target.x,
                    y: m.target.y,
                },
                status: m.status,
                assigned_robot: m.assigned_robot,
            })
            .collect();

        let obstacles = world
            .obstacles
            .iter()
            .map(|o| ObstacleOut {
                kind: o.kind,
                x: o.pos.x,
                y: o.pos.y,
            })
            .collect();

        let charging_stations = world
            .stations
            .iter()
            .map(|s| ChargingStationOut {
                x: s.pos.x,
                y: s.pos.y,
            })
            .collect();

        let completed = world.missions.iter().filter(|m| m.is_completed()).count() as u32;
        let pending = world.missions.iter().filter(|m| m.is_pending()).count() as u32;
        let active_robots = world.robots.iter().filter(|r| !r.is_dead()).count() as u32;
        let total_distance: f64 = world.robots.iter().map(|r| r.total_distance).sum();
        let avg_completion = if world.completed_times.is_empty() {
            0.0
        } else {
            world.completed_times.iter().sum::<f64>() / world.completed_times.len() as f64
        };

        Self {
            robots,
            missions,
            obstacles,
            charging_stations,
            metrics: MetricsOut {
                active_robots,
                completed_missions: completed,
                pending_missions: pending,
                total_distance_traveled: round1(total_distance),
                avg_completion_time: round1(avg_completion),
            },
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// Round to one decimal place for the wire
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescuegrid_config::SimulatorConfig;
    use rescuegrid_core::SimRng;

    #[test]
    fn test_round1() {
        assert_eq!(round1(1.25), 1.3);
        assert_eq!(round1(99.94), 99.9);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_capture_counts_and_timestamp() {
        let world = World::generate(&SimulatorConfig::default(), SimRng::new(5));
        let state = SimulationStateOut::capture(&world);

        assert_eq!(state.robots.len(), 5);
        assert_eq!(state.missions.len(), 15);
        assert_eq!(state.metrics.active_robots, 5);
        assert_eq!(state.metrics.pending_missions, 15);
        assert_eq!(state.metrics.completed_missions, 0);
        assert_eq!(state.metrics.avg_completion_time, 0.0);
        assert!(state.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_wire_shape_is_stable() {
        let world = World::generate(&SimulatorConfig::default(), SimRng::new(5));
        let state = SimulationStateOut::capture(&world);
        let json = serde_json::to_value(&state).unwrap();

        let robot = &json["robots"][0];
        assert!(robot["id"].is_u64());
        assert_eq!(robot["status"], "idle");
        assert!(robot["mission_id"].is_null());

        let mission = &json["missions"][0];
        assert_eq!(mission["priority"], "high");
        assert_eq!(mission["status"], "pending");
        assert!(mission["target"]["x"].is_i64());

        assert_eq!(json["obstacles"][0]["type"], "debris");
        assert!(json["charging_stations"][0]["x"].is_i64());
    }

    #[test]
    fn test_snapshot_roundtrips_through_json() {
        let world = World::generate(&SimulatorConfig::default(), SimRng::new(5));
        let state = SimulationStateOut::capture(&world);
        let json = serde_json::to_string(&state).unwrap();
        let parsed: SimulationStateOut = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.robots.len(), state.robots.len());
        assert_eq!(parsed.metrics.pending_missions, state.metrics.pending_missions);
        assert_eq!(parsed.timestamp, state.timestamp);
    }
}

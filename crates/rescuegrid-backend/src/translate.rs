//! Engine schema to external schema translation
//!
//! The engine speaks lowercase statuses and integer ids; downstream clients
//! get uppercase statuses, stringified ids, tupled positions, and missions
//! split into active and completed lists. Grid dimensions always come from
//! the configured size, never from the engine payload.

use crate::types::{
    MapGrid, Mission, MissionPriority, MissionStatus, RobotState, RobotStatus, SimulationState,
};
use rescuegrid_entities as entities;
use rescuegrid_sim::SimulationStateOut;

fn robot_status(status: entities::RobotStatus) -> RobotStatus {
    match status {
        entities::RobotStatus::Idle => RobotStatus::Idle,
        entities::RobotStatus::Moving => RobotStatus::Moving,
        entities::RobotStatus::Charging => RobotStatus::Charging,
        entities::RobotStatus::Dead => RobotStatus::Dead,
    }
}

fn mission_priority(priority: entities::MissionPriority) -> MissionPriority {
    match priority {
        entities::MissionPriority::High => MissionPriority::High,
        entities::MissionPriority::Medium => MissionPriority::Medium,
        entities::MissionPriority::Low => MissionPriority::Low,
    }
}

fn mission_status(status: entities::MissionStatus) -> MissionStatus {
    match status {
        entities::MissionStatus::Pending => MissionStatus::Pending,
        entities::MissionStatus::Active => MissionStatus::InProgress,
        entities::MissionStatus::Completed => MissionStatus::Completed,
    }
}

/// Convert one engine snapshot into the external schema
pub fn translate(engine: &SimulationStateOut, step: u64, grid_size: u32) -> SimulationState {
    let robots = engine
        .robots
        .iter()
        .map(|r| RobotState {
            id: r.id.to_string(),
            position: (r.x, r.y),
            battery: r.battery,
            status: robot_status(r.status),
            current_mission: r.mission_id.map(|m| m.to_string()),
        })
        .collect();

    let missions: Vec<Mission> = engine
        .missions
        .iter()
        .map(|m| Mission {
            id: m.id.to_string(),
            priority: mission_priority(m.priority),
            target: (m.target.x, m.target.y),
            status: mission_status(m.status),
            assigned_robot: m.assigned_robot.map(|r| r.to_string()),
        })
        .collect();
    let (completed, active): (Vec<Mission>, Vec<Mission>) = missions
        .into_iter()
        .partition(|m| m.status == MissionStatus::Completed);

    SimulationState {
        step,
        robots,
        grid: MapGrid {
            width: grid_size,
            height: grid_size,
            obstacles: engine.obstacles.iter().map(|o| (o.x, o.y)).collect(),
            charging_stations: engine
                .charging_stations
                .iter()
                .map(|s| (s.x, s.y))
                .collect(),
        },
        active_missions: active,
        completed_missions: completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescuegrid_core::{MissionId, RobotId};
    use rescuegrid_sim::{
        ChargingStationOut, MetricsOut, MissionOut, ObstacleOut, PositionOut, RobotOut,
    };

    fn engine_snapshot() -> SimulationStateOut {
        SimulationStateOut {
            robots: vec![
                RobotOut {
                    id: RobotId(1),
                    x: 3,
                    y: 4,
                    battery: 76.0,
                    status: entities::RobotStatus::Moving,
                    mission_id: Some(MissionId(2)),
                },
                RobotOut {
                    id: RobotId(2),
                    x: 0,
                    y: 0,
                    battery: 0.0,
                    status: entities::RobotStatus::Dead,
                    mission_id: None,
                },
            ],
            missions: vec![
                MissionOut {
                    id: MissionId(1),
                    priority: entities::MissionPriority::Low,
                    target: PositionOut { x: 9, y: 9 },
                    status: entities::MissionStatus::Completed,
                    assigned_robot: Some(RobotId(2)),
                },
                MissionOut {
                    id: MissionId(2),
                    priority: entities::MissionPriority::High,
                    target: PositionOut { x: 7, y: 1 },
                    status: entities::MissionStatus::Active,
                    assigned_robot: Some(RobotId(1)),
                },
                MissionOut {
                    id: MissionId(3),
                    priority: entities::MissionPriority::Medium,
                    target: PositionOut { x: 2, y: 8 },
                    status: entities::MissionStatus::Pending,
                    assigned_robot: None,
                },
            ],
            obstacles: vec![ObstacleOut {
                kind: entities::ObstacleKind::Debris,
                x: 5,
                y: 5,
            }],
            charging_stations: vec![ChargingStationOut { x: 1, y: 1 }],
            metrics: MetricsOut {
                active_robots: 1,
                completed_missions: 1,
                pending_missions: 1,
                total_distance_traveled: 12.0,
                avg_completion_time: 8.5,
            },
            timestamp: "2026-08-01T00:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn test_translate_maps_statuses_and_ids() {
        let state = translate(&engine_snapshot(), 7, 50);

        assert_eq!(state.step, 7);
        let robot = &state.robots[0];
        assert_eq!(robot.id, "1");
        assert_eq!(robot.position, (3, 4));
        assert_eq!(robot.status, RobotStatus::Moving);
        assert_eq!(robot.current_mission.as_deref(), Some("2"));
        assert_eq!(state.robots[1].status, RobotStatus::Dead);
    }

    #[test]
    fn test_translate_splits_missions() {
        let state = translate(&engine_snapshot(), 1, 50);

        assert_eq!(state.active_missions.len(), 2);
        assert_eq!(state.completed_missions.len(), 1);
        assert_eq!(state.completed_missions[0].id, "1");

        let in_progress = state
            .active_missions
            .iter()
            .find(|m| m.id == "2")
            .unwrap();
        assert_eq!(in_progress.status, MissionStatus::InProgress);
        assert_eq!(in_progress.priority, MissionPriority::High);
        assert_eq!(in_progress.assigned_robot.as_deref(), Some("1"));

        let pending = state
            .active_missions
            .iter()
            .find(|m| m.id == "3")
            .unwrap();
        assert_eq!(pending.status, MissionStatus::Pending);
    }

    #[test]
    fn test_translate_grid_comes_from_config_not_payload() {
        let state = translate(&engine_snapshot(), 1, 32);
        assert_eq!(state.grid.width, 32);
        assert_eq!(state.grid.height, 32);
        assert_eq!(state.grid.obstacles, vec![(5, 5)]);
        assert_eq!(state.grid.charging_stations, vec![(1, 1)]);
    }

    /// Translating and mapping back preserves every observable field
    #[test]
    fn test_translation_round_trip() {
        let engine = engine_snapshot();
        let state = translate(&engine, 1, 50);

        let mut external: Vec<&Mission> = state
            .active_missions
            .iter()
            .chain(state.completed_missions.iter())
            .collect();
        external.sort_by_key(|m| m.id.parse::<u32>().unwrap());
        assert_eq!(external.len(), engine.missions.len());

        for (orig, ext) in engine.missions.iter().zip(external) {
            assert_eq!(orig.id.to_string(), ext.id);
            assert_eq!((orig.target.x, orig.target.y), ext.target);
            assert_eq!(
                orig.assigned_robot.map(|r| r.to_string()),
                ext.assigned_robot
            );
            // Statuses survive modulo case normalization
            let back = match ext.status {
                MissionStatus::Pending => entities::MissionStatus::Pending,
                MissionStatus::InProgress => entities::MissionStatus::Active,
                MissionStatus::Completed => entities::MissionStatus::Completed,
            };
            assert_eq!(orig.status, back);
        }

        for (orig, ext) in engine.robots.iter().zip(state.robots.iter()) {
            assert_eq!(orig.id.to_string(), ext.id);
            assert_eq!((orig.x, orig.y), ext.position);
            assert_eq!(orig.battery, ext.battery);
            assert_eq!(
                orig.mission_id.map(|m| m.to_string()),
                ext.current_mission
            );
        }
    }
}

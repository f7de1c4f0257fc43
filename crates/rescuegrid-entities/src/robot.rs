//! Robot entity and state machine

use rescuegrid_core::{Cell, MissionId, RobotId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Robot state in the simulation
///
/// `Dead` is absorbing until the next reset.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RobotStatus {
    /// Available for mission assignment
    #[default]
    Idle,
    /// Walking a planned path, toward a mission target or a charger
    Moving,
    /// Parked on a charging station, battery below full
    Charging,
    /// Battery depleted or no route to a charger
    Dead,
}

/// A rescue robot on the grid
#[derive(Clone, Debug)]
pub struct Robot {
    pub id: RobotId,
    pub pos: Cell,
    /// State of charge in percent, always within [0, 100]
    pub battery: f64,
    pub status: RobotStatus,
    pub mission: Option<MissionId>,
    /// Remaining cells to walk, one per tick
    pub path: VecDeque<Cell>,
    pub total_distance: f64,
    /// The station cell this robot is routing to, if any
    pub charge_destination: Option<Cell>,
}

impl Robot {
    pub fn new(id: RobotId, pos: Cell) -> Self {
        Self {
            id,
            pos,
            battery: 100.0,
            status: RobotStatus::Idle,
            mission: None,
            path: VecDeque::new(),
            total_distance: 0.0,
            charge_destination: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == RobotStatus::Idle
    }

    pub fn is_dead(&self) -> bool {
        self.status == RobotStatus::Dead
    }

    /// Whether this robot may take on a mission
    pub fn can_accept_mission(&self, min_battery: f64) -> bool {
        self.is_idle() && self.battery > min_battery
    }

    /// Begin walking a path toward a mission target
    pub fn start_mission(&mut self, mission: MissionId, path_tail: &[Cell]) {
        self.path = path_tail.iter().copied().collect();
        self.status = RobotStatus::Moving;
        self.mission = Some(mission);
        self.charge_destination = None;
    }

    /// Begin walking a path toward a charging station
    pub fn head_to_charger(&mut self, station: Cell, path_tail: &[Cell]) {
        self.path = path_tail.iter().copied().collect();
        self.charge_destination = Some(station);
        self.status = RobotStatus::Moving;
    }

    /// Take one step along the path; drains battery and accrues distance
    pub fn step(&mut self, drain: f64) -> Option<Cell> {
        let next = self.path.pop_front()?;
        self.pos = next;
        self.battery = (self.battery - drain).max(0.0);
        self.total_distance += 1.0;
        Some(next)
    }

    /// Add charge, capped at full. Returns true once the battery is full.
    pub fn charge(&mut self, amount: f64) -> bool {
        self.battery = (self.battery + amount).min(100.0);
        self.battery >= 100.0
    }

    pub fn mark_dead(&mut self) {
        self.status = RobotStatus::Dead;
        self.path.clear();
        self.charge_destination = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_robot_is_idle_and_full() {
        let robot = Robot::new(RobotId(1), Cell::new(2, 3));
        assert_eq!(robot.status, RobotStatus::Idle);
        assert_eq!(robot.battery, 100.0);
        assert!(robot.path.is_empty());
        assert!(robot.mission.is_none());
    }

    #[test]
    fn test_step_drains_and_floors_battery() {
        let mut robot = Robot::new(RobotId(1), Cell::new(0, 0));
        robot.battery = 3.0;
        robot.path = [Cell::new(1, 0), Cell::new(2, 0)].into_iter().collect();

        robot.step(2.0);
        assert_eq!(robot.pos, Cell::new(1, 0));
        assert_eq!(robot.battery, 1.0);

        robot.step(2.0);
        assert_eq!(robot.battery, 0.0);
        assert_eq!(robot.total_distance, 2.0);
    }

    #[test]
    fn test_charge_caps_at_full() {
        let mut robot = Robot::new(RobotId(1), Cell::new(0, 0));
        robot.battery = 99.9;
        assert!(robot.charge(10.0));
        assert_eq!(robot.battery, 100.0);
    }

    #[test]
    fn test_mission_accept_threshold() {
        let mut robot = Robot::new(RobotId(1), Cell::new(0, 0));
        robot.battery = 50.0;
        assert!(!robot.can_accept_mission(50.0));
        robot.battery = 50.1;
        assert!(robot.can_accept_mission(50.0));
        robot.status = RobotStatus::Moving;
        assert!(!robot.can_accept_mission(50.0));
    }

    #[test]
    fn test_status_serialization_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&RobotStatus::Charging).unwrap(),
            "\"charging\""
        );
        assert_eq!(
            serde_json::from_str::<RobotStatus>("\"dead\"").unwrap(),
            RobotStatus::Dead
        );
    }
}

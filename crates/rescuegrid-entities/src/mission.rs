//! Rescue mission entity

use chrono::{DateTime, Utc};
use rescuegrid_core::{Cell, MissionId, RobotId};
use serde::{Deserialize, Serialize};

/// Mission priority; higher scores are assigned first
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MissionPriority {
    High,
    Medium,
    Low,
}

impl MissionPriority {
    /// Numeric score used for assignment ordering
    pub fn score(&self) -> u8 {
        match self {
            MissionPriority::High => 3,
            MissionPriority::Medium => 2,
            MissionPriority::Low => 1,
        }
    }

    pub const ALL: [MissionPriority; 3] = [
        MissionPriority::High,
        MissionPriority::Medium,
        MissionPriority::Low,
    ];
}

/// Mission status
///
/// `Completed` is absorbing; `Active` reverts to `Pending` when the
/// assigned robot releases the mission.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissionStatus {
    #[default]
    Pending,
    Active,
    Completed,
}

/// A rescue mission with a target cell on the grid
#[derive(Clone, Debug)]
pub struct Mission {
    pub id: MissionId,
    pub priority: MissionPriority,
    pub target: Cell,
    pub status: MissionStatus,
    pub assigned_robot: Option<RobotId>,
    /// Set when first activated; cleared again if the mission is released
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Mission {
    pub fn new(id: MissionId, priority: MissionPriority, target: Cell) -> Self {
        Self {
            id,
            priority,
            target,
            status: MissionStatus::Pending,
            assigned_robot: None,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MissionStatus::Pending
    }

    pub fn is_active(&self) -> bool {
        self.status == MissionStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == MissionStatus::Completed
    }

    /// Assign this mission to a robot. The start timestamp is only recorded
    /// the first time the mission becomes active since its last release.
    pub fn activate(&mut self, robot: RobotId, now: DateTime<Utc>) {
        self.status = MissionStatus::Active;
        self.assigned_robot = Some(robot);
        self.started_at.get_or_insert(now);
    }

    /// Revert an active mission to pending and detach it from its robot
    pub fn release(&mut self) {
        if self.is_active() {
            self.status = MissionStatus::Pending;
            self.assigned_robot = None;
            self.started_at = None;
        }
    }

    /// Mark completed; returns the elapsed time since activation in seconds
    pub fn complete(&mut self, now: DateTime<Utc>) -> Option<f64> {
        self.status = MissionStatus::Completed;
        self.completed_at = Some(now);
        self.started_at
            .map(|start| (now - start).num_milliseconds() as f64 / 1000.0)
    }
}

//! Published-state store shared by the poller, the HTTP handlers, and the
//! streaming emitters
//!
//! One guard serializes every access. The poller swaps a fully translated
//! snapshot in; readers clone or serialize under the read half. Critical
//! sections stay short: fetch and translation happen outside.

use crate::types::{Metrics, SimulationState};
use rescuegrid_sim::state::round1;
use tokio::sync::RwLock;

/// Everything the aggregator publishes, swapped atomically per poll
#[derive(Clone, Debug)]
pub struct Published {
    pub state: SimulationState,
    /// Mean mission completion time from the most recent successful poll
    pub avg_delivery_time: f64,
    /// Fleet distance total from the most recent successful poll
    pub total_distance_traveled: f64,
}

/// The snapshot guard
pub struct StateStore {
    inner: RwLock<Published>,
}

impl StateStore {
    pub fn new(grid_size: u32) -> Self {
        Self {
            inner: RwLock::new(Published {
                state: SimulationState::empty(grid_size),
                avg_delivery_time: 0.0,
                total_distance_traveled: 0.0,
            }),
        }
    }

    /// Poller swap: replace the snapshot and its metric fields
    pub async fn publish(&self, state: SimulationState, avg_delivery: f64, total_distance: f64) {
        let mut guard = self.inner.write().await;
        guard.state = state;
        guard.avg_delivery_time = avg_delivery;
        guard.total_distance_traveled = total_distance;
    }

    /// Manual injection via `POST /update`: replaces the snapshot only,
    /// keeping the poll-derived metric fields
    pub async fn replace(&self, state: SimulationState) -> u64 {
        let mut guard = self.inner.write().await;
        let step = state.step;
        guard.state = state;
        step
    }

    pub async fn snapshot(&self) -> SimulationState {
        self.inner.read().await.state.clone()
    }

    /// Serialize the current snapshot while holding the guard, so emitters
    /// always ship an internally consistent document
    pub async fn to_json(&self) -> String {
        let guard = self.inner.read().await;
        serde_json::to_string(&guard.state).unwrap_or_else(|_| "{}".to_string())
    }

    /// Fleet metrics derived from the published snapshot
    pub async fn metrics(&self) -> Metrics {
        let guard = self.inner.read().await;
        let robots = &guard.state.robots;

        let active_robots = robots
            .iter()
            .filter(|r| r.status != crate::types::RobotStatus::Dead)
            .count() as u32;

        let clamped_total: f64 = robots.iter().map(|r| r.battery.clamp(0.0, 100.0)).sum();
        let fleet_battery = if robots.is_empty() {
            0.0
        } else {
            clamped_total / robots.len() as f64
        };
        let total_battery_used = (100.0 * robots.len() as f64 - clamped_total).max(0.0);

        Metrics {
            active_robots,
            completed_missions: guard.state.completed_missions.len() as u32,
            avg_delivery_time: round1(guard.avg_delivery_time),
            total_battery_used: round1(total_battery_used),
            fleet_battery: round1(fleet_battery),
            total_distance_traveled: round1(guard.total_distance_traveled),
        }
    }
}

//! The tick-driven simulation engine
//!
//! Each tick runs five phases in strict order: assign pending missions,
//! move robots one step, process mission completion, manage battery and
//! charging, mark depleted robots dead. Later phases see the world as
//! mutated by earlier phases of the same tick.

use crate::state::SimulationStateOut;
use crate::world::World;
use chrono::{DateTime, Utc};
use rescuegrid_config::SimulatorConfig;
use rescuegrid_core::SimRng;
use rescuegrid_entities::RobotStatus;
use rescuegrid_map::astar;
use tracing::{error, info, warn};

pub struct Engine {
    config: SimulatorConfig,
    pub world: World,
}

impl Engine {
    /// Create an engine with a world seeded from OS entropy
    pub fn new(config: SimulatorConfig) -> Self {
        let world = World::generate(&config, SimRng::from_entropy());
        Self { config, world }
    }

    /// Create an engine with a reproducible world
    pub fn with_seed(config: SimulatorConfig, seed: u64) -> Self {
        let world = World::generate(&config, SimRng::new(seed));
        Self { config, world }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Discard all state and rebuild the world. The RNG stream continues,
    /// so successive resets give fresh (but reproducible) layouts.
    pub fn reset(&mut self) {
        let rng = self.world.rng.clone();
        self.world = World::generate(&self.config, rng);
        info!("simulation reset");
    }

    /// Advance the world by exactly one discrete step
    pub fn tick(&mut self) {
        self.step(Utc::now());
    }

    /// Advance with an explicit clock; `tick` uses the wall clock
    pub fn step(&mut self, now: DateTime<Utc>) {
        self.world.tick_count += 1;
        self.assign_pending_missions(now);
        self.move_robots_one_step();
        self.process_mission_completion(now);
        self.manage_battery_and_charging();
        self.mark_dead_robots();
    }

    /// A deep, immutable view of the current world and derived metrics
    pub fn snapshot(&self) -> SimulationStateOut {
        SimulationStateOut::capture(&self.world)
    }

    /// Phase 1: hand pending missions to idle, charged robots.
    ///
    /// Highest priority first; each mission goes to the Manhattan-nearest
    /// candidate. The phase stops as soon as no candidate remains. A
    /// mission whose target cannot be routed stays pending and consumes
    /// no robot.
    fn assign_pending_missions(&mut self, now: DateTime<Utc>) {
        let mut pending: Vec<usize> = (0..self.world.missions.len())
            .filter(|&i| self.world.missions[i].is_pending())
            .collect();
        if pending.is_empty() {
            return;
        }
        pending.sort_by(|&a, &b| {
            self.world.missions[b]
                .priority
                .score()
                .cmp(&self.world.missions[a].priority.score())
        });

        for mi in pending {
            let target = self.world.missions[mi].target;
            let candidate = self
                .world
                .robots
                .iter()
                .enumerate()
                .filter(|(_, r)| r.can_accept_mission(self.config.min_battery_for_mission))
                .min_by_key(|(_, r)| r.pos.manhattan(target))
                .map(|(i, _)| i);
            let Some(ri) = candidate else {
                return;
            };

            let start = self.world.robots[ri].pos;
            let Some(route) = astar(&self.world.map, start, target) else {
                warn!(
                    mission = %self.world.missions[mi].id,
                    target = %target,
                    "mission currently unreachable"
                );
                continue;
            };

            // A robot that was pre-empted into charging can still hold its
            // old mission; hand that one back before taking the new one so
            // no active mission is left without a holder.
            self.release_mission_of(ri);

            let mission_id = self.world.missions[mi].id;
            let robot_id = self.world.robots[ri].id;
            self.world.robots[ri].start_mission(mission_id, route.tail());
            self.world.missions[mi].activate(robot_id, now);

            info!(
                mission = %mission_id,
                priority = ?self.world.missions[mi].priority,
                robot = %robot_id,
                "mission assigned"
            );
        }
    }

    /// Phase 2: every moving robot walks one cell, or settles on arrival
    fn move_robots_one_step(&mut self) {
        let drain = self.config.battery_drain_per_move;
        for robot in &mut self.world.robots {
            if robot.status != RobotStatus::Moving {
                continue;
            }
            if robot.path.is_empty() {
                // Arrived: a recorded charge destination means this was a
                // charging run, otherwise the robot idles at the target.
                if robot.charge_destination == Some(robot.pos) {
                    robot.status = RobotStatus::Charging;
                } else {
                    robot.status = RobotStatus::Idle;
                }
                continue;
            }
            robot.step(drain);
        }
    }

    /// Phase 3: robots standing on their active mission target complete it
    fn process_mission_completion(&mut self, now: DateTime<Utc>) {
        for ri in 0..self.world.robots.len() {
            let robot = &self.world.robots[ri];
            if robot.is_dead() {
                continue;
            }
            let Some(mission_id) = robot.mission else {
                continue;
            };
            let Some(mi) = self.world.mission_index(mission_id) else {
                continue;
            };
            if !self.world.missions[mi].is_active() {
                continue;
            }

            let at_target = robot.pos == self.world.missions[mi].target;
            if at_target && robot.path.is_empty() {
                if let Some(elapsed) = self.world.missions[mi].complete(now) {
                    self.world.completed_times.push(elapsed);
                }
                let robot = &mut self.world.robots[ri];
                robot.mission = None;
                robot.path.clear();
                robot.status = RobotStatus::Idle;
                info!(
                    mission = %mission_id,
                    robot = %self.world.robots[ri].id,
                    "mission completed"
                );
            }
        }
    }

    /// Phase 4: robots on a station charge (pre-empting whatever they were
    /// doing); low-battery robots off-station drop their mission and route
    /// to the nearest charger, dying if none is reachable.
    fn manage_battery_and_charging(&mut self) {
        for ri in 0..self.world.robots.len() {
            if self.world.robots[ri].is_dead() {
                continue;
            }

            let pos = self.world.robots[ri].pos;
            let at_station = self.world.stations.iter().any(|s| s.pos == pos);

            if at_station && self.world.robots[ri].battery < 100.0 {
                let robot = &mut self.world.robots[ri];
                robot.status = RobotStatus::Charging;
                robot.path.clear();
                robot.charge_destination = Some(pos);
                if robot.charge(self.config.battery_charge_per_tick) {
                    robot.status = RobotStatus::Idle;
                    robot.charge_destination = None;
                }
                continue;
            }

            if self.world.robots[ri].battery < self.config.low_battery_threshold && !at_station {
                self.release_mission_of(ri);

                // Stations exist from reset; an empty list means the robot
                // has nowhere to go.
                let Some(station) = self.world.nearest_station(pos) else {
                    self.world.robots[ri].mark_dead();
                    continue;
                };
                match astar(&self.world.map, pos, station) {
                    Some(route) => {
                        self.world.robots[ri].head_to_charger(station, route.tail());
                    }
                    None => {
                        let robot = &mut self.world.robots[ri];
                        robot.mark_dead();
                        error!(robot = %robot.id, "no route to charging station, robot dead");
                    }
                }
            }
        }
    }

    /// Phase 5: battery at zero is terminal
    fn mark_dead_robots(&mut self) {
        for ri in 0..self.world.robots.len() {
            if self.world.robots[ri].is_dead() {
                continue;
            }
            if self.world.robots[ri].battery <= 0.0 {
                self.release_mission_of(ri);
                let robot = &mut self.world.robots[ri];
                robot.mark_dead();
                warn!(robot = %robot.id, "battery depleted, robot dead");
            }
        }
    }

    /// Detach the robot's mission, reverting it to pending if still active
    fn release_mission_of(&mut self, ri: usize) {
        let Some(mission_id) = self.world.robots[ri].mission.take() else {
            return;
        };
        if let Some(mission) = self.world.mission_mut(mission_id) {
            mission.release();
        }
    }
}

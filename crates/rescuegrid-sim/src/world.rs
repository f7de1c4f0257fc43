//! World state container and generation

use rescuegrid_config::SimulatorConfig;
use rescuegrid_core::{Cell, IdGenerator, MissionId, RobotId, SimRng, StationId};
use rescuegrid_entities::{ChargingStation, Mission, MissionPriority, Obstacle, Robot};
use rescuegrid_map::GridMap;
use std::collections::HashSet;
use tracing::info;

/// Container for all simulation state.
///
/// Robots and missions live in dense vectors with sequential 1-based ids,
/// so a robot's `mission` and a mission's `assigned_robot` are symmetric
/// integer keys rather than aliased records.
pub struct World {
    pub rng: SimRng,
    pub map: GridMap,

    pub robots: Vec<Robot>,
    pub missions: Vec<Mission>,
    pub obstacles: Vec<Obstacle>,
    pub stations: Vec<ChargingStation>,

    /// Completion durations in seconds, one entry per completed mission
    pub completed_times: Vec<f64>,
    pub tick_count: u64,
}

impl World {
    /// Build a fresh world per the configured counts: fixed station layout,
    /// random obstacles off the stations, robots and mission targets on
    /// random free cells.
    pub fn generate(config: &SimulatorConfig, mut rng: SimRng) -> Self {
        let size = config.grid_size;

        let mut station_id_gen = IdGenerator::<StationId>::new();
        let stations: Vec<ChargingStation> = station_layout(size)
            .into_iter()
            .map(|pos| ChargingStation::new(station_id_gen.next_id(), pos))
            .collect();
        let station_cells: HashSet<Cell> = stations.iter().map(|s| s.pos).collect();

        let mut obstacle_cells: HashSet<Cell> = HashSet::new();
        while (obstacle_cells.len() as u32) < config.obstacle_count {
            let candidate = rng.gen_cell(size);
            if station_cells.contains(&candidate) {
                continue;
            }
            obstacle_cells.insert(candidate);
        }
        let obstacles: Vec<Obstacle> = obstacle_cells.iter().map(|&c| Obstacle::new(c)).collect();
        let map = GridMap::with_blocked(size, obstacle_cells);

        let mut robot_id_gen = IdGenerator::<RobotId>::new();
        let mut robots = Vec::with_capacity(config.robot_count as usize);
        for _ in 0..config.robot_count {
            let pos = random_free_cell(&mut rng, &map, &station_cells);
            robots.push(Robot::new(robot_id_gen.next_id(), pos));
        }

        let mut mission_id_gen = IdGenerator::<MissionId>::new();
        let mut missions =
            Vec::with_capacity((config.missions_per_priority as usize) * MissionPriority::ALL.len());
        for priority in MissionPriority::ALL {
            for _ in 0..config.missions_per_priority {
                let target = random_free_cell(&mut rng, &map, &station_cells);
                missions.push(Mission::new(mission_id_gen.next_id(), priority, target));
            }
        }

        info!(
            robots = robots.len(),
            missions = missions.len(),
            obstacles = obstacles.len(),
            "world generated"
        );

        Self {
            rng,
            map,
            robots,
            missions,
            obstacles,
            stations,
            completed_times: Vec::new(),
            tick_count: 0,
        }
    }

    pub fn robot_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        self.robots.iter_mut().find(|r| r.id == id)
    }

    pub fn mission_mut(&mut self, id: MissionId) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|m| m.id == id)
    }

    /// Index of a mission in the arena
    pub fn mission_index(&self, id: MissionId) -> Option<usize> {
        self.missions.iter().position(|m| m.id == id)
    }

    /// The Manhattan-nearest charging station cell from a position
    pub fn nearest_station(&self, from: Cell) -> Option<Cell> {
        self.stations
            .iter()
            .map(|s| s.pos)
            .min_by_key(|pos| from.manhattan(*pos))
    }
}

/// Fixed charging-station layout, scaled from the 50-cell reference grid:
/// two pads along the near edge, one pad mid-far.
fn station_layout(size: u32) -> [Cell; 3] {
    let s = size as i32;
    let margin = s / 10;
    [
        Cell::new(margin, margin),
        Cell::new(s - margin, margin),
        Cell::new(s / 2, s - margin),
    ]
}

fn random_free_cell(rng: &mut SimRng, map: &GridMap, station_cells: &HashSet<Cell>) -> Cell {
    loop {
        let cell = rng.gen_cell(map.size());
        if map.is_free(cell) && !station_cells.contains(&cell) {
            return cell;
        }
    }
}
